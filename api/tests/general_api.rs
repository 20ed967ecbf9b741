/// General API tests
/// Endpoints outside the users resource: health, echo, docs, fallback
mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use common::{seeded_app, send, send_request};
use serde_json::json;

#[tokio::test]
async fn test_health() {
    let app = seeded_app();

    let (status, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert_eq!(body["environment"], "development");
    assert!(body["uptime"].as_f64().unwrap() >= 0.0);
}

#[tokio::test]
async fn test_root_points_at_docs() {
    let app = seeded_app();

    let (status, body) = send(&app, "GET", "/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["documentation"], "/api/docs");
    assert_eq!(body["health"], "/health");
}

#[tokio::test]
async fn test_status_and_info() {
    let app = seeded_app();

    let (status, body) = send(&app, "GET", "/api/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "active");

    let (status, body) = send(&app, "GET", "/api/info", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["serverName"], "Frit Backend");
    assert_eq!(body["data"]["platform"], std::env::consts::OS);
}

#[tokio::test]
async fn test_echo_returns_what_it_received() {
    let app = seeded_app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/test?lang=vi")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::USER_AGENT, "frit-tests")
        .body(Body::from(json!({ "hello": "world" }).to_string()))
        .unwrap();

    let (status, body) = send_request(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["receivedBody"], json!({ "hello": "world" }));
    assert_eq!(body["data"]["receivedQuery"], json!({ "lang": "vi" }));
    assert_eq!(body["data"]["userAgent"], "frit-tests");
    assert_eq!(body["data"]["contentType"], "application/json");
    assert_eq!(body["data"]["method"], "POST");
    assert_eq!(body["data"]["url"], "/api/test?lang=vi");
}

#[tokio::test]
async fn test_docs_describe_user_routes() {
    let app = seeded_app();

    let (status, body) = send(&app, "GET", "/api/docs", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/users"]["get"].is_object());
    assert!(body["paths"]["/api/users/{id}/status"]["patch"].is_object());
    assert!(body["paths"]["/api/users"]["post"]["responses"]["500"].is_object());
}

#[tokio::test]
async fn test_unknown_route_gets_envelope() {
    let app = seeded_app();

    let (status, body) = send(&app, "GET", "/api/nope", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["requestedUrl"], "/api/nope");
    assert_eq!(body["method"], "GET");
}

#[tokio::test]
async fn test_security_headers() {
    let app = seeded_app();

    for uri in ["/api/users", "/api/nope"] {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = tower::ServiceExt::oneshot(app.clone(), request)
            .await
            .unwrap();
        let headers = response.headers();

        assert_eq!(headers["x-content-type-options"], "nosniff");
        assert_eq!(headers["x-frame-options"], "SAMEORIGIN");
        assert_eq!(headers["referrer-policy"], "no-referrer");
        assert_eq!(headers["cross-origin-resource-policy"], "same-origin");
        assert_eq!(headers["cross-origin-opener-policy"], "same-origin");
    }
}
