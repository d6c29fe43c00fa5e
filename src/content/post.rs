//! Post models and the text heuristics used to fill them

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

/// Excerpts longer than this many characters get truncated
pub const EXCERPT_MAX_CHARS: usize = 200;

/// Number of characters kept before the ellipsis when truncating
const EXCERPT_CUT_CHARS: usize = EXCERPT_MAX_CHARS - ELLIPSIS.len();

const ELLIPSIS: &str = "...";

lazy_static! {
    static ref SLUG_RE: Regex = Regex::new(r"^[A-Za-z0-9_-]+$").unwrap();
}

/// A post as shown in listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostSummary {
    /// Identifier derived from the filename stem, used in URLs
    pub slug: String,

    /// Post title
    pub title: String,

    /// Lead paragraph, at most `EXCERPT_MAX_CHARS` characters
    pub excerpt: String,
}

impl PostSummary {
    /// Build a summary from a post's identifier and raw markdown
    pub fn from_source(slug: &str, text: &str) -> Self {
        Self {
            slug: slug.to_string(),
            title: title_or_fallback(slug, text),
            excerpt: extract_excerpt(text),
        }
    }
}

/// A single post with its rendered body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostDetail {
    pub slug: String,
    pub title: String,

    /// Rendered HTML content
    pub html: String,
}

/// Check that a slug is safe to turn into a file name.
///
/// Only ASCII letters, digits, `-` and `_` are accepted, which rules out
/// path separators and `..` segments.
pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_RE.is_match(slug)
}

/// Find the first level-1 heading (`# Title`) in the raw text
pub fn extract_title(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix("# "))
        .map(|title| title.trim().to_string())
}

/// Heading title if present, else the humanized slug
pub fn title_or_fallback(slug: &str, text: &str) -> String {
    extract_title(text).unwrap_or_else(|| humanize_slug(slug))
}

/// Turn `hello-world` into `Hello World`
pub fn humanize_slug(slug: &str) -> String {
    slug.replace('-', " ")
        .split(' ')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Take the first paragraph of the text, truncated at a word boundary.
///
/// When the paragraph exceeds `EXCERPT_MAX_CHARS`, the result is cut back so
/// that the ellipsis still fits within the limit.
pub fn extract_excerpt(text: &str) -> String {
    let normalized = text.replace("\r\n", "\n");
    let first = normalized
        .trim()
        .split("\n\n")
        .next()
        .unwrap_or_default()
        .trim();

    if first.chars().count() <= EXCERPT_MAX_CHARS {
        return first.to_string();
    }

    let cut = first
        .char_indices()
        .nth(EXCERPT_CUT_CHARS)
        .map(|(i, _)| i)
        .unwrap_or(first.len());
    let head = &first[..cut];

    // A cut landing right before whitespace keeps the last word whole
    let at_boundary = first[cut..]
        .chars()
        .next()
        .map_or(true, char::is_whitespace);
    let head = if at_boundary {
        head
    } else {
        match head.rfind(char::is_whitespace) {
            Some(pos) => &head[..pos],
            None => head,
        }
    };

    format!("{}{}", head.trim_end(), ELLIPSIS)
}
