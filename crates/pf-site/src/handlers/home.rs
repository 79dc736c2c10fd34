//! Welcome Page Handler

use axum::{extract::State, response::IntoResponse};

use crate::{
    state::AppState,
    templates::{PageLink, WelcomeTemplate},
};

/// Handler for the welcome page at `/`.
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.pages();
    let pages: Vec<PageLink> = store
        .pages()
        .into_iter()
        .map(|p| PageLink {
            slug: p.slug.clone(),
            title: p.title.clone(),
        })
        .collect();

    WelcomeTemplate::new("Pagefold", pages)
}
