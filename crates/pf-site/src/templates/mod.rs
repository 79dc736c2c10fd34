//! Askama Templates
//!
//! Template structs for rendering HTML pages.

use askama::Template;
use askama_web::WebTemplate;

use crate::{content::TocHeading, BUILD_VERSION};

/// Welcome page template.
#[derive(Template, WebTemplate)]
#[template(path = "welcome.html")]
pub struct WelcomeTemplate {
    pub title: String,
    pub pages: Vec<PageLink>,
    /// Build version for cache busting static assets.
    pub v: &'static str,
}

impl WelcomeTemplate {
    pub fn new(title: impl Into<String>, pages: Vec<PageLink>) -> Self {
        Self {
            title: title.into(),
            pages,
            v: BUILD_VERSION,
        }
    }
}

/// A link to a content page for the welcome listing.
pub struct PageLink {
    pub slug: String,
    pub title: String,
}

/// Content page template (rendered from markdown).
#[derive(Template, WebTemplate)]
#[template(path = "page.html")]
pub struct PageTemplate {
    pub title: String,
    pub page_title: String,
    pub date: Option<String>,
    pub content_html: String,
    pub headings: Vec<TocHeading>,
    /// Build version for cache busting static assets.
    pub v: &'static str,
}

impl PageTemplate {
    pub fn new(
        title: impl Into<String>,
        page_title: impl Into<String>,
        date: Option<String>,
        content_html: impl Into<String>,
        headings: Vec<TocHeading>,
    ) -> Self {
        Self {
            title: title.into(),
            page_title: page_title.into(),
            date,
            content_html: content_html.into(),
            headings,
            v: BUILD_VERSION,
        }
    }
}
