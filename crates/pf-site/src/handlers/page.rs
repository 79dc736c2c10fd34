//! Content Page Handler
//!
//! Serves `/page-{id}` by looking the id up in the page store. The path
//! parameter is only ever used as a map key; it never reaches the
//! filesystem, so there is no path to traverse.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{state::AppState, templates::PageTemplate};

/// Handler for `/page-{id}` URLs.
///
/// Axum path parameters span a whole segment, so the route matches `{slug}`
/// and the `page-` prefix is checked here. Anything else is a 404.
pub async fn page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, StatusCode> {
    let id = page_id(&slug).ok_or(StatusCode::NOT_FOUND)?;
    let store = state.pages();
    let page = store.page(id).ok_or(StatusCode::NOT_FOUND)?;

    Ok(PageTemplate::new(
        format!("{} - Pagefold", page.title),
        page.title.clone(),
        page.date.map(|d| d.format("%B %d, %Y").to_string()),
        page.content_html.clone(),
        page.headings.clone(),
    ))
}

/// Extract the page id from a `page-<id>` path segment.
fn page_id(slug: &str) -> Option<&str> {
    let id = slug.strip_prefix("page-")?;
    if id.is_empty() { None } else { Some(id) }
}
