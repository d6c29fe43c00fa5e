//! List site posts

use anyhow::Result;

use crate::content::Scan;
use crate::Site;

/// Format the listing, followed by any files that cannot be served
pub fn format_scan(scan: &Scan) -> Vec<String> {
    let mut lines = vec![format!("Posts ({}):", scan.posts.len())];
    lines.extend(
        scan.posts
            .iter()
            .map(|post| format!("  {} - {}", post.slug, post.title)),
    );

    if !scan.skipped.is_empty() {
        lines.push(format!(
            "Skipped ({}), names may only use letters, digits, '-' and '_':",
            scan.skipped.len()
        ));
        lines.extend(
            scan.skipped
                .iter()
                .map(|path| format!("  {}", path.display())),
        );
    }

    lines
}

/// List posts in the order the blog index shows them
pub fn run(site: &Site) -> Result<()> {
    let scan = site.post_store().scan()?;
    for line in format_scan(&scan) {
        println!("{}", line);
    }
    Ok(())
}
