//! Create a new post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::content::POST_EXTENSION;
use crate::Site;

/// Create a dated post file seeded with its title heading
pub fn create_post(site: &Site, title: &str) -> Result<PathBuf> {
    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a file name from title: {:?}", title);
    }

    let now = chrono::Local::now();
    let filename = format!("{}-{}.{}", now.format("%Y-%m-%d"), slug, POST_EXTENSION);

    fs::create_dir_all(&site.content_dir)?;
    let file_path = site.content_dir.join(filename);

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    fs::write(&file_path, format!("# {}\n\n", title.trim()))?;
    tracing::debug!("Created post {:?}", file_path);

    Ok(file_path)
}

/// Run the new command
pub fn run(site: &Site, title: &str) -> Result<()> {
    let path = create_post(site, title)?;
    println!("Created: {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::post::is_valid_slug;
    use tempfile::TempDir;

    #[test]
    fn test_create_post() {
        let tmp = TempDir::new().unwrap();
        let site = Site::new(tmp.path()).unwrap();

        let path = create_post(&site, "Hello, World!").unwrap();
        let stem = path.file_stem().unwrap().to_str().unwrap();
        assert!(stem.ends_with("-hello-world"));
        assert!(is_valid_slug(stem));
        assert_eq!(fs::read_to_string(&path).unwrap(), "# Hello, World!\n\n");

        let posts = site.post_store().list_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Hello, World!");
    }

    #[test]
    fn test_create_post_twice_fails() {
        let tmp = TempDir::new().unwrap();
        let site = Site::new(tmp.path()).unwrap();
        create_post(&site, "Same").unwrap();
        assert!(create_post(&site, "Same").is_err());
    }

    #[test]
    fn test_create_post_empty_title() {
        let tmp = TempDir::new().unwrap();
        let site = Site::new(tmp.path()).unwrap();
        assert!(create_post(&site, "!!!").is_err());
    }
}
