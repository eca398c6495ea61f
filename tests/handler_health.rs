mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use image_url_resolver::api::handlers::health_handler;
use image_url_resolver::domain::HostAllowlist;

#[tokio::test]
async fn test_health_endpoint_success() {
    let state = common::create_test_state();
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["normalizer"]["status"], "ok");
    assert_eq!(
        json["checks"]["normalizer"]["message"],
        "Backend origin: http://localhost:5000"
    );
    assert_eq!(json["checks"]["allowlist"]["status"], "ok");
}

#[tokio::test]
async fn test_health_endpoint_structure() {
    let state = common::create_test_state_without_origin();
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    let json = response.json::<serde_json::Value>();

    assert!(json.get("status").is_some());
    assert!(json.get("version").is_some());
    assert!(json["checks"].get("normalizer").is_some());
    assert!(json["checks"].get("allowlist").is_some());
    assert_eq!(
        json["checks"]["normalizer"]["message"],
        "No backend origin, relative paths pass through"
    );
}

#[tokio::test]
async fn test_health_warns_on_empty_allowlist() {
    let state = common::create_state(None, HostAllowlist::empty(), 10);
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let json = server.get("/health").await.json::<serde_json::Value>();

    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["allowlist"]["status"], "warning");
    assert_eq!(json["checks"]["allowlist"]["message"], "0 unoptimized host fragments");
}
