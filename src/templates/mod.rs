//! Built-in site templates using the Tera template engine
//!
//! Templates are embedded in the binary. Handlers hand them a `Context`
//! built from `SiteContext` plus page-specific data.

use anyhow::Result;
use serde::Serialize;
use tera::{Context, Tera};

use crate::config::SiteConfig;

/// Template renderer with the embedded site theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all site templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Autoescaping stays on for `.html`; rendered post bodies opt out
        // with `| safe` in blog_post.html.
        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("index.html", include_str!("site/index.html")),
            ("blog_list.html", include_str!("site/blog_list.html")),
            ("blog_post.html", include_str!("site/blog_post.html")),
            ("not_found.html", include_str!("site/not_found.html")),
        ])?;

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Values every page's layout needs
#[derive(Debug, Clone, Serialize)]
pub struct SiteContext {
    pub name: String,
    pub current_year: String,
    pub highlight: bool,
}

impl SiteContext {
    pub fn new(config: &SiteConfig, highlight: bool) -> Self {
        Self {
            name: config.name.clone(),
            current_year: chrono::Local::now().format("%Y").to_string(),
            highlight,
        }
    }

    /// Start a template context seeded with the site values
    pub fn to_context(&self) -> Context {
        let mut context = Context::new();
        context.insert("name", &self.name);
        context.insert("current_year", &self.current_year);
        context.insert("highlight", &self.highlight);
        context
    }
}
