//! Page Content Loading and Parsing
//!
//! Markdown pages with YAML frontmatter support and syntax highlighting.
//! All content is parsed once at startup into an immutable [`PageStore`];
//! request handlers only ever read from it.

use std::{
    collections::HashMap,
    fmt::Write as _,
    fs,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use gray_matter::{engine::YAML, Matter, ParsedEntity};
use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use serde::Deserialize;
use syntect::{
    html::{ClassStyle, ClassedHTMLGenerator},
    parsing::SyntaxSet,
};
use thiserror::Error;

/// A content page with metadata and rendered HTML.
#[derive(Clone, Debug)]
pub struct Page {
    pub slug: String,
    pub title: String,
    pub date: Option<NaiveDate>,
    pub order: i32,
    pub content_html: String,
    pub headings: Vec<TocHeading>,
}

/// Frontmatter for content pages.
#[derive(Deserialize)]
struct PageFrontmatter {
    title: String,
    slug: String,
    date: Option<String>,
    #[serde(default)]
    order: i32,
}

/// A heading extracted from rendered markdown for on-page anchors.
#[derive(Clone, Debug)]
pub struct TocHeading {
    pub id: String,
    pub text: String,
    pub level: String,
}

/// Rendered markdown content with extracted headings.
struct RenderedContent {
    html: String,
    headings: Vec<TocHeading>,
}

/// Errors produced while parsing a single page file.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("missing or invalid frontmatter in {path}")]
    Frontmatter { path: PathBuf },
    #[error("invalid date {value:?} in {path} (expected YYYY-MM-DD)")]
    Date { value: String, path: PathBuf },
}

/// Store for all content pages, keyed by slug.
#[derive(Clone, Debug, Default)]
pub struct PageStore {
    pages: HashMap<String, Page>,
    slugs_sorted: Vec<String>,
}

impl PageStore {
    /// Load all pages from a content directory.
    ///
    /// Files that fail to parse are logged and skipped; a missing directory
    /// yields an empty store rather than an error, so the server still comes
    /// up and serves the welcome page.
    pub fn load(dir: &Path) -> Self {
        let mut store = Self::default();

        if !dir.exists() {
            tracing::warn!("Content directory does not exist: {:?}", dir);
            return store;
        }

        let Ok(entries) = fs::read_dir(dir) else {
            tracing::error!("Failed to read content directory: {:?}", dir);
            return store;
        };

        let matter = Matter::<YAML>::new();

        for entry in entries.flatten() {
            let path = entry.path();

            if path.extension().is_some_and(|ext| ext == "md") {
                match Self::parse_page(&path, &matter) {
                    Ok(page) => {
                        if store.pages.contains_key(&page.slug) {
                            tracing::warn!(
                                "Duplicate page slug {:?} in {:?}, keeping the first",
                                page.slug,
                                path
                            );
                            continue;
                        }
                        store.slugs_sorted.push(page.slug.clone());
                        store.pages.insert(page.slug.clone(), page);
                    }
                    Err(e) => tracing::warn!("Skipping page: {e}"),
                }
            }
        }

        // Stable listing order: frontmatter order, then slug
        store.slugs_sorted.sort_by(|a, b| {
            let page_a = store.pages.get(a);
            let page_b = store.pages.get(b);
            match (page_a, page_b) {
                (Some(a), Some(b)) => a.order.cmp(&b.order).then_with(|| a.slug.cmp(&b.slug)),
                _ => std::cmp::Ordering::Equal,
            }
        });

        store
    }

    fn parse_page(path: &Path, matter: &Matter<YAML>) -> Result<Page, PageError> {
        let raw = fs::read_to_string(path).map_err(|source| PageError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let parsed: ParsedEntity<PageFrontmatter> =
            matter.parse(&raw).map_err(|_| PageError::Frontmatter {
                path: path.to_path_buf(),
            })?;

        let frontmatter = parsed.data.ok_or_else(|| PageError::Frontmatter {
            path: path.to_path_buf(),
        })?;

        let date = match frontmatter.date {
            Some(value) => Some(NaiveDate::parse_from_str(&value, "%Y-%m-%d").map_err(|_| {
                PageError::Date {
                    value,
                    path: path.to_path_buf(),
                }
            })?),
            None => None,
        };

        let rendered = render_markdown(&parsed.content);

        Ok(Page {
            slug: frontmatter.slug,
            title: frontmatter.title,
            date,
            order: frontmatter.order,
            content_html: rendered.html,
            headings: rendered.headings,
        })
    }

    /// Get a single page by slug.
    pub fn page(&self, slug: &str) -> Option<&Page> {
        self.pages.get(slug)
    }

    /// Get all pages in listing order.
    pub fn pages(&self) -> Vec<&Page> {
        self.slugs_sorted
            .iter()
            .filter_map(|slug| self.pages.get(slug))
            .collect()
    }

    /// Number of loaded pages.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether the store holds no pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Render markdown to HTML with syntax highlighting and heading extraction.
///
/// The first h1 is skipped because the page template renders the title in
/// its own header. h2/h3 headings get slugified ids and are collected for
/// the on-page anchor list.
fn render_markdown(markdown: &str) -> RenderedContent {
    let ss = SyntaxSet::load_defaults_newlines();

    let options = Options::all();
    let parser = Parser::new_ext(markdown, options);

    let mut html_output = String::new();
    let mut headings = Vec::new();
    let mut in_code_block = false;
    let mut code_block_lang: Option<String> = None;
    let mut code_block_content = String::new();
    let mut in_heading = false;
    let mut heading_text = String::new();
    let mut seen_h1 = false;

    for event in parser {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                let lvl = level as u8;
                if lvl == 1 && !seen_h1 {
                    // Skip the first h1 (it's rendered in the template header)
                    in_heading = true;
                    heading_text.clear();
                } else if lvl == 2 || lvl == 3 {
                    in_heading = true;
                    heading_text.clear();
                } else {
                    pulldown_cmark::html::push_html(
                        &mut html_output,
                        std::iter::once(Event::Start(Tag::Heading {
                            level,
                            id: None,
                            classes: Vec::new(),
                            attrs: Vec::new(),
                        })),
                    );
                }
            }
            Event::End(TagEnd::Heading(level)) => {
                let lvl = level as u8;
                if in_heading && lvl == 1 && !seen_h1 {
                    // Skip rendering the first h1 entirely
                    seen_h1 = true;
                    in_heading = false;
                } else if in_heading && (lvl == 2 || lvl == 3) {
                    let id = slugify(&heading_text);
                    headings.push(TocHeading {
                        id: id.clone(),
                        text: heading_text.clone(),
                        level: format!("h{lvl}"),
                    });
                    let _ = write!(
                        html_output,
                        "<h{lvl} id=\"{id}\">{text}</h{lvl}>",
                        text = html_escape(&heading_text)
                    );
                    in_heading = false;
                } else {
                    pulldown_cmark::html::push_html(
                        &mut html_output,
                        std::iter::once(Event::End(TagEnd::Heading(level))),
                    );
                }
            }
            Event::Text(ref text) if in_heading => {
                heading_text.push_str(text);
            }
            Event::Code(ref code) if in_heading => {
                heading_text.push_str(code);
            }
            // Other inline markup inside a captured heading is dropped;
            // the heading renders as plain text
            _ if in_heading => {}
            Event::Start(Tag::CodeBlock(kind)) => {
                in_code_block = true;
                code_block_lang = match kind {
                    CodeBlockKind::Fenced(lang) => {
                        let lang_str = lang.to_string();
                        // Strip attributes like "rust,ignore" -> "rust"
                        let clean = lang_str.split(',').next().unwrap_or("").trim().to_string();
                        if clean.is_empty() { None } else { Some(clean) }
                    }
                    CodeBlockKind::Indented => None,
                };
                code_block_content.clear();
            }
            Event::End(TagEnd::CodeBlock) => {
                let highlighted =
                    highlight_code(&code_block_content, code_block_lang.as_deref(), &ss);

                let lang_class = code_block_lang
                    .as_ref()
                    .map(|l| format!(" language-{l}"))
                    .unwrap_or_default();

                let _ = write!(
                    html_output,
                    "<pre class=\"highlight{lang_class}\"><code>{highlighted}</code></pre>"
                );
                in_code_block = false;
                code_block_lang = None;
            }
            Event::Text(text) if in_code_block => {
                code_block_content.push_str(&text);
            }
            other => {
                pulldown_cmark::html::push_html(&mut html_output, std::iter::once(other));
            }
        }
    }

    RenderedContent {
        html: html_output,
        headings,
    }
}

/// Slugify a heading text for use as an HTML id.
fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Minimal HTML escaping for heading text.
fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Highlight code using syntect with CSS classes.
fn highlight_code(code: &str, lang: Option<&str>, ss: &SyntaxSet) -> String {
    let syntax = lang
        .and_then(|l| ss.find_syntax_by_token(l))
        .unwrap_or_else(|| ss.find_syntax_plain_text());

    let mut html_generator =
        ClassedHTMLGenerator::new_with_class_style(syntax, ss, ClassStyle::Spaced);

    for line in code.lines() {
        // ClassedHTMLGenerator expects lines without trailing newlines
        let _ = html_generator.parse_html_for_line_which_includes_newline(&format!("{line}\n"));
    }

    html_generator.finalize()
}
