//! Content module - post discovery, metadata and rendering

mod markdown;
pub mod post;
mod store;

pub use markdown::MarkdownRenderer;
pub use post::{PostDetail, PostSummary};
pub use store::{ContentError, PostStore, Scan, POST_EXTENSION};
