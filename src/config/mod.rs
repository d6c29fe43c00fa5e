//! Configuration module

mod site;

pub use site::HighlightConfig;
pub use site::Project;
pub use site::SiteConfig;
