#![cfg(feature = "server")]

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use bibshelf::{server, Bibliography};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use tower::ServiceExt;

const CITATIONS: &str = include_str!("fixtures/references.bib");
const METADATA: &str = include_str!("fixtures/custom_info.yaml");

fn app() -> Router {
    server::build_router(Arc::new(Bibliography::parse(CITATIONS, METADATA)))
}

async fn get(uri: &str, if_none_match: Option<&str>) -> axum::response::Response {
    let mut request = Request::builder().uri(uri);
    if let Some(tag) = if_none_match {
        request = request.header(header::IF_NONE_MATCH, tag);
    }
    app().oneshot(request.body(Body::empty()).unwrap()).await.unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_missing_site_id() {
    let response = get("/api/bibliography", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({ "error": "Missing required parameter: siteId" })
    );
}

#[tokio::test]
async fn test_invalid_site_id() {
    let response = get("/api/bibliography?siteId=site-name", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Invalid siteId format");
}

#[tokio::test]
async fn test_unknown_site_id() {
    let response = get("/api/bibliography?siteId=nobody.example", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "siteId not found: nobody.example");
}

#[tokio::test]
async fn test_site_view_headers_and_body() {
    let response = get("/api/bibliography?siteId=foobar_com", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers();
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    assert_eq!(
        headers[header::CACHE_CONTROL],
        "public, max-age=3600, stale-while-revalidate=86400"
    );
    let etag = headers[header::ETAG].to_str().unwrap().to_string();
    assert!(etag.starts_with('"') && etag.ends_with('"'));
    assert_eq!(etag.len(), 18);

    let body = body_json(response).await;
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"], "kono-2004");
    assert_eq!(items[0]["customInfo"]["readDate"], "2020-04-01");
    assert!(!body.to_string().contains("memo"));
}

#[tokio::test]
async fn test_etag_is_stable_and_answers_not_modified() {
    let first = get("/api/bibliography?siteId=foobar_com", None).await;
    let etag = first.headers()[header::ETAG].to_str().unwrap().to_string();

    let second = get("/api/bibliography?siteId=foobar_com", None).await;
    assert_eq!(second.headers()[header::ETAG], etag.as_str());

    let cached = get("/api/bibliography?siteId=foobar_com", Some(&etag)).await;
    assert_eq!(cached.status(), StatusCode::NOT_MODIFIED);
    assert_eq!(cached.headers()[header::ETAG], etag.as_str());
    let bytes = axum::body::to_bytes(cached.into_body(), usize::MAX).await.unwrap();
    assert!(bytes.is_empty());

    let stale = get("/api/bibliography?siteId=foobar_com", Some("\"0000000000000000\"")).await;
    assert_eq!(stale.status(), StatusCode::OK);

    let other = get("/api/bibliography?siteId=other_site", None).await;
    assert_ne!(other.headers()[header::ETAG], etag.as_str());
}

#[tokio::test]
async fn test_repeated_site_id_uses_first() {
    let response = get("/api/bibliography?siteId=foobar_com&siteId=other_site", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let ids: Vec<_> = body.as_array().unwrap().iter().map(|item| item["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["kono-2004", "suwa-2016"]);

    let response = get("/api/bibliography?siteId=&siteId=foobar_com", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    assert_eq!(body_json(response).await["error"], "Missing required parameter: siteId");
}

#[tokio::test]
async fn test_other_parameters_are_ignored() {
    let response = get("/api/bibliography?lang=ja&siteId=other_site", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_exported_data_serves_same_answer() {
    let parsed = Bibliography::parse(CITATIONS, METADATA);
    let dir = tempfile::tempdir().unwrap();
    let written = bibshelf::export(&parsed, dir.path(), None, &Default::default()).unwrap();
    let loaded = bibshelf::from_file(&written[0]).unwrap();

    let request = || Request::builder().uri("/api/bibliography?siteId=foobar_com").body(Body::empty()).unwrap();
    let from_sources = app().oneshot(request()).await.unwrap();
    let from_export = server::build_router(Arc::new(loaded)).oneshot(request()).await.unwrap();

    assert_eq!(from_export.status(), StatusCode::OK);
    assert_eq!(from_export.headers()[header::ETAG], from_sources.headers()[header::ETAG]);
}

#[tokio::test]
async fn test_health() {
    let response = get("/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({ "status": "ok", "items": 4, "sites": 2 })
    );
}
