//! In-process route tests.
//!
//! Each test drives the router directly with `tower::ServiceExt::oneshot`,
//! using the fixture pages under `tests/fixtures/pages`.

use std::path::Path;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use tower::ServiceExt;

use pf_site::{content::PageStore, router::create_router, state::AppState};

fn test_router() -> Router {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/pages");
    let pages = PageStore::load(&dir);
    create_router(AppState::new(pages))
}

async fn get(path: &str) -> Response {
    test_router()
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_string(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_welcome_page_loads() {
    let response = get("/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("Welcome"));
    assert!(body.contains("/page-home"));
    assert!(body.contains("/page-plain"));
}

#[tokio::test]
async fn test_welcome_lists_pages_in_order() {
    let body = body_string(get("/").await).await;
    let home_pos = body.find("/page-home").unwrap();
    let plain_pos = body.find("/page-plain").unwrap();
    assert!(home_pos < plain_pos, "pages should be listed by order");
}

#[tokio::test]
async fn test_existing_page_loads() {
    let response = get("/page-home").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("Welcome to the fixture home page"));
    assert!(body.contains("<h2 id=\"section-one\">Section One</h2>"));
    assert!(body.contains("January 15, 2026"));
}

#[tokio::test]
async fn test_page_without_date_loads() {
    let response = get("/page-plain").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("A page without a date"));
}

#[tokio::test]
async fn test_unknown_page_is_404() {
    let response = get("/page-doesnotexist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_page_slug_is_404() {
    let response = get("/doesnotexist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_empty_page_id_is_404() {
    let response = get("/page-").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_file_without_frontmatter_is_not_served() {
    // broken.md has no frontmatter, so no slug ever maps to it
    let response = get("/page-broken").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_welcome_is_idempotent() {
    let first = body_string(get("/").await).await;
    let second = body_string(get("/").await).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_html_content_type() {
    let response = get("/").await;
    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.starts_with("text/html"));
}

#[tokio::test]
async fn test_security_headers() {
    let response = get("/").await;
    let headers = response.headers();
    for name in [
        "content-security-policy",
        "strict-transport-security",
        "x-frame-options",
        "x-content-type-options",
        "referrer-policy",
    ] {
        assert!(headers.contains_key(name), "missing header: {name}");
    }
}

#[tokio::test]
async fn test_x_frame_options_is_deny() {
    let response = get("/").await;
    let xfo = response
        .headers()
        .get("x-frame-options")
        .unwrap()
        .to_str()
        .unwrap();
    assert_eq!(xfo, "DENY");
}

#[tokio::test]
async fn test_security_headers_on_404() {
    let response = get("/page-doesnotexist").await;
    assert!(response.headers().contains_key("x-frame-options"));
}

/// A swapped-in page store must be visible to routes immediately, so the
/// debug hot-reload path serves fresh content rather than whatever was
/// parsed at startup.
#[cfg(debug_assertions)]
#[tokio::test]
async fn test_replaced_store_is_served() {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/pages");
    let state = AppState::new(PageStore::load(&dir));
    let router = create_router(state.clone());

    let before = router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/page-home")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(before.status(), StatusCode::OK);

    // Simulate a content reload that removed every page
    state.replace_pages(PageStore::default());

    let after = router
        .oneshot(
            Request::builder()
                .uri("/page-home")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(after.status(), StatusCode::NOT_FOUND);
}
