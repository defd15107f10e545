//! Integration tests for the listing routes, run against a temp-file store.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use extraction::{ListingFile, ListingStore};
use server_core::server::app::build_app;
use tower::ServiceExt;

fn seeded_app(dir: &tempfile::TempDir) -> (Router, ListingFile) {
    let file = ListingFile::new(dir.path().join("list.json"));
    let mut store = ListingStore::new();
    store.whitelist.insert("https://a.test/1".to_string());
    store.whitelist.insert("https://a.test/2".to_string());
    file.save(&store).unwrap();
    (build_app(file.clone()), file)
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_reports_counts() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = seeded_app(&dir);

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["listings"]["whitelist"], 2);
    assert_eq!(json["listings"]["blacklist"], 0);
}

#[tokio::test]
async fn health_degrades_on_malformed_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("list.json");
    std::fs::write(&path, "not json").unwrap();
    let app = build_app(ListingFile::new(&path));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_json(response).await;
    assert_eq!(json["status"], "unhealthy");
}

#[tokio::test]
async fn listings_returns_whitelist() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = seeded_app(&dir);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/listings")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["count"], 2);
    assert_eq!(
        json["whitelist"],
        serde_json::json!(["https://a.test/1", "https://a.test/2"])
    );
}

#[tokio::test]
async fn index_renders_whitelist_links() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = seeded_app(&dir);

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let page = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(page.contains("https://a.test/1"));
    assert!(page.contains("https://a.test/2"));
    assert!(page.contains("button"));
}

#[tokio::test]
async fn blacklist_promotes_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let (app, file) = seeded_app(&dir);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/blacklist")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"url":"https://a.test/1"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["whitelist_count"], 1);
    assert_eq!(json["blacklist_count"], 1);

    let store = file.load().unwrap();
    assert!(!store.whitelist.contains("https://a.test/1"));
    assert!(store.blacklist.contains("https://a.test/1"));
    assert!(store.is_consistent());
}

#[tokio::test]
async fn blacklisting_unknown_link_still_records_it() {
    let dir = tempfile::tempdir().unwrap();
    let (app, file) = seeded_app(&dir);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/blacklist")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"url":"https://never.seen/9"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let store = file.load().unwrap();
    assert_eq!(store.whitelist.len(), 2);
    assert!(store.blacklist.contains("https://never.seen/9"));
}
