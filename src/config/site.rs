//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Identity
    pub name: String,
    pub tagline: String,

    // Directory
    pub content_dir: String,
    pub static_dir: String,

    // Home page
    pub recent_posts: usize,
    pub projects: Vec<Project>,

    #[serde(default)]
    pub highlight: HighlightConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "Surya Mishra".to_string(),
            tagline: "Refugee. Builder. Dreamer. Technologist.".to_string(),

            content_dir: "content/posts".to_string(),
            static_dir: "static".to_string(),

            recent_posts: 3,
            projects: vec![
                Project {
                    title: "Database Automation Toolkit".to_string(),
                    description: "Tools and scripts for automating database deployments, backups, and health checks.".to_string(),
                    url: "#".to_string(),
                },
                Project {
                    title: "Cloud Migration Scripts".to_string(),
                    description: "Opinionated helpers to migrate on-prem databases to Azure with minimal downtime.".to_string(),
                    url: "#".to_string(),
                },
            ],

            highlight: HighlightConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// A project shown on the home page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    #[serde(default = "default_project_url")]
    pub url: String,
}

fn default_project_url() -> String {
    "#".to_string()
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    pub theme: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            theme: "base16-ocean.dark".to_string(),
        }
    }
}
