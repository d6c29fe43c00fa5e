//! homepage-rs: a personal homepage and blog server
//!
//! Posts are Markdown files in a content directory. Every request re-reads
//! them from disk and renders the result through embedded Tera templates.

pub mod commands;
pub mod config;
pub mod content;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Name of the optional configuration file in the site directory
pub const CONFIG_FILE: &str = "_config.yml";

/// A site rooted at a directory
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding post sources
    pub content_dir: PathBuf,
    /// Directory served under /static
    pub static_dir: PathBuf,
}

impl Site {
    /// Create a site from a directory, reading `_config.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            tracing::debug!("Loading config from {:?}", config_path);
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a site with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let content_dir = base_dir.join(&config.content_dir);
        let static_dir = base_dir.join(&config.static_dir);

        Self {
            config,
            base_dir,
            content_dir,
            static_dir,
        }
    }

    /// Build the post store for this site's content directory
    pub fn post_store(&self) -> content::PostStore {
        let highlight = &self.config.highlight;
        let renderer = content::MarkdownRenderer::with_options(&highlight.theme, highlight.enable);
        content::PostStore::new(&self.content_dir, renderer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_site_defaults() {
        let tmp = TempDir::new().unwrap();
        let site = Site::new(tmp.path()).unwrap();
        assert_eq!(site.content_dir, tmp.path().join("content/posts"));
        assert_eq!(site.static_dir, tmp.path().join("static"));
        assert_eq!(site.config.name, "Surya Mishra");
    }

    #[test]
    fn test_site_reads_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            "name: Jane Doe\ncontent_dir: posts\n",
        )
        .unwrap();
        let site = Site::new(tmp.path()).unwrap();
        assert_eq!(site.config.name, "Jane Doe");
        assert_eq!(site.content_dir, tmp.path().join("posts"));
        assert_eq!(site.post_store().dir(), tmp.path().join("posts").as_path());
    }

    #[test]
    fn test_site_bad_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "recent_posts: [not, a, number]\n").unwrap();
        assert!(Site::new(tmp.path()).is_err());
    }
}
