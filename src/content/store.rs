//! Post store - lists and loads posts from the content directory

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use super::post::{is_valid_slug, title_or_fallback, PostDetail, PostSummary};
use super::MarkdownRenderer;

/// File extension of post sources
pub const POST_EXTENSION: &str = "md";

/// Errors raised while reading posts
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Post not found: {0}")]
    NotFound(String),

    #[error("Invalid post identifier: {0:?}")]
    InvalidSlug(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContentError {
    /// Whether the error means the requested post does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::InvalidSlug(_))
    }
}

impl From<walkdir::Error> for ContentError {
    fn from(err: walkdir::Error) -> Self {
        Self::Io(err.into())
    }
}

/// Result of scanning the content directory
#[derive(Debug, Default)]
pub struct Scan {
    /// Posts, newest filename first
    pub posts: Vec<PostSummary>,

    /// Post files whose names are not valid slugs
    pub skipped: Vec<PathBuf>,
}

/// Reads posts from a fixed directory on every call
pub struct PostStore {
    dir: PathBuf,
    renderer: MarkdownRenderer,
}

impl PostStore {
    /// Create a store over `dir`
    pub fn new<P: Into<PathBuf>>(dir: P, renderer: MarkdownRenderer) -> Self {
        Self {
            dir: dir.into(),
            renderer,
        }
    }

    /// Content directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Markdown renderer used for post bodies
    pub fn renderer(&self) -> &MarkdownRenderer {
        &self.renderer
    }

    /// List all posts, newest filename first
    pub fn list_posts(&self) -> Result<Vec<PostSummary>, ContentError> {
        Ok(self.scan()?.posts)
    }

    /// Scan the content directory, keeping track of post files that
    /// cannot be served under their name
    pub fn scan(&self) -> Result<Scan, ContentError> {
        let mut scan = Scan::default();
        if !self.dir.exists() {
            tracing::debug!("Content directory {:?} does not exist", self.dir);
            return Ok(scan);
        }

        for entry in WalkDir::new(&self.dir)
            .follow_links(true)
            .min_depth(1)
            .max_depth(1)
        {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type().is_file() || !is_post_file(path) {
                continue;
            }

            let slug = match path.file_stem().and_then(|s| s.to_str()) {
                Some(slug) if is_valid_slug(slug) => slug,
                _ => {
                    tracing::warn!("Skipping post with unservable name: {:?}", path);
                    scan.skipped.push(path.to_path_buf());
                    continue;
                }
            };

            let text = fs::read_to_string(path)?;
            scan.posts.push(PostSummary::from_source(slug, &text));
        }

        // Sort key is the slug, not the full file name, so `a-b.md` lists before `a.md`
        scan.posts.sort_by(|a, b| b.slug.cmp(&a.slug));
        scan.skipped.sort();

        tracing::debug!("Listed {} posts from {:?}", scan.posts.len(), self.dir);
        Ok(scan)
    }

    /// Load one post and render its body
    pub fn load_post(&self, slug: &str) -> Result<PostDetail, ContentError> {
        if !is_valid_slug(slug) {
            return Err(ContentError::InvalidSlug(slug.to_string()));
        }

        let path = self.dir.join(format!("{}.{}", slug, POST_EXTENSION));
        if !path.is_file() {
            return Err(ContentError::NotFound(slug.to_string()));
        }

        let text = fs::read_to_string(&path)?;
        let html = self.renderer.render(&text);

        Ok(PostDetail {
            slug: slug.to_string(),
            title: title_or_fallback(slug, &text),
            html,
        })
    }
}

/// Check if a file is a post source
fn is_post_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == POST_EXTENSION)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_with(files: &[(&str, &str)]) -> (TempDir, PostStore) {
        let tmp = TempDir::new().unwrap();
        for (name, content) in files {
            fs::write(tmp.path().join(name), content).unwrap();
        }
        let store = PostStore::new(tmp.path(), MarkdownRenderer::new());
        (tmp, store)
    }

    #[test]
    fn test_list_posts_newest_first() {
        let (_tmp, store) = store_with(&[
            ("2023-01-01-a.md", "# Older\n\nFirst."),
            ("2024-05-05-b.md", "# Newer\n\nSecond."),
        ]);
        let posts = store.list_posts().unwrap();
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["2024-05-05-b", "2023-01-01-a"]);
        assert_eq!(posts[0].title, "Newer");
    }

    #[test]
    fn test_list_posts_metadata() {
        let (_tmp, store) = store_with(&[("hello-world.md", "Just a body line.\n\nMore text.")]);
        let posts = store.list_posts().unwrap();
        assert_eq!(
            posts,
            vec![PostSummary {
                slug: "hello-world".to_string(),
                title: "Hello World".to_string(),
                excerpt: "Just a body line.".to_string(),
            }]
        );
    }

    #[test]
    fn test_list_posts_filters_files() {
        let (tmp, store) = store_with(&[
            ("post.md", "# Post"),
            ("notes.txt", "# Not a post"),
            ("bad name.md", "# Unservable"),
        ]);
        let nested = tmp.path().join("drafts");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("draft.md"), "# Draft").unwrap();

        let posts = store.list_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "post");
    }

    #[test]
    fn test_scan_reports_skipped_files() {
        let (tmp, store) = store_with(&[("ok.md", "# Ok"), ("my.post.md", "# Dotted")]);
        let scan = store.scan().unwrap();
        assert_eq!(scan.posts.len(), 1);
        assert_eq!(scan.skipped, vec![tmp.path().join("my.post.md")]);
    }

    #[test]
    fn test_list_posts_sorts_by_slug() {
        let (_tmp, store) = store_with(&[("a.md", "# A"), ("a-b.md", "# A B")]);
        let slugs: Vec<_> = store
            .list_posts()
            .unwrap()
            .into_iter()
            .map(|p| p.slug)
            .collect();
        assert_eq!(slugs, vec!["a-b", "a"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_list_posts_follows_symlinks() {
        let tmp = TempDir::new().unwrap();
        let posts = tmp.path().join("posts");
        fs::create_dir_all(&posts).unwrap();
        fs::write(tmp.path().join("real.md"), "# Linked").unwrap();
        std::os::unix::fs::symlink("../real.md", posts.join("linked.md")).unwrap();
        let store = PostStore::new(&posts, MarkdownRenderer::new());

        let listed = store.list_posts().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].slug, "linked");
        assert_eq!(store.load_post("linked").unwrap().title, "Linked");
    }

    #[test]
    fn test_list_posts_unreadable_file_is_io_error() {
        let (tmp, store) = store_with(&[("fine.md", "# Fine")]);
        fs::write(tmp.path().join("broken.md"), [0xffu8, 0xfe]).unwrap();
        assert!(matches!(store.list_posts(), Err(ContentError::Io(_))));
    }

    #[test]
    fn test_list_posts_missing_dir() {
        let tmp = TempDir::new().unwrap();
        let store = PostStore::new(tmp.path().join("missing"), MarkdownRenderer::new());
        assert!(store.list_posts().unwrap().is_empty());
    }

    #[test]
    fn test_load_post() {
        let (_tmp, store) = store_with(&[(
            "first.md",
            "# My Title\n\n```rust\nfn main() {}\n```\n\n| a | b |\n|---|---|\n| 1 | 2 |\n",
        )]);
        let post = store.load_post("first").unwrap();
        assert_eq!(post.slug, "first");
        assert_eq!(post.title, "My Title");
        assert!(post.html.contains("<h1>My Title</h1>"));
        assert!(post.html.contains("<code"));
        assert!(post.html.contains("<table>"));
    }

    #[test]
    fn test_load_post_fallback_title() {
        let (_tmp, store) = store_with(&[("hello-world.md", "No heading.")]);
        assert_eq!(store.load_post("hello-world").unwrap().title, "Hello World");
    }

    #[test]
    fn test_load_post_not_found() {
        let (_tmp, store) = store_with(&[]);
        let err = store.load_post("nonexistent-slug").unwrap_err();
        assert!(matches!(err, ContentError::NotFound(_)));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_load_post_rejects_traversal() {
        let tmp = TempDir::new().unwrap();
        let posts = tmp.path().join("posts");
        fs::create_dir_all(&posts).unwrap();
        fs::write(tmp.path().join("secret.md"), "# Secret").unwrap();
        let store = PostStore::new(&posts, MarkdownRenderer::new());

        for slug in ["../secret", "..", "a/b", "", "secret.md"] {
            let err = store.load_post(slug).unwrap_err();
            assert!(matches!(err, ContentError::InvalidSlug(_)), "{:?}", slug);
            assert!(err.is_not_found());
        }
    }

    #[test]
    fn test_load_post_directory_is_not_a_post() {
        let (tmp, store) = store_with(&[]);
        fs::create_dir_all(tmp.path().join("folder.md")).unwrap();
        assert!(matches!(
            store.load_post("folder").unwrap_err(),
            ContentError::NotFound(_)
        ));
    }
}
