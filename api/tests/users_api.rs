/// Users API tests
/// Drive the full router (middleware included) over an in-memory store
mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use common::{app_with, ids, seeded_app, send, send_request};
use frit_db::storage::memory::MemoryStorage;
use serde_json::json;

#[tokio::test]
async fn test_create_search_reject_delete_scenario() {
    let app = seeded_app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/users",
        Some(json!({ "name": "X", "email": "x@x.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["id"], 4);
    assert_eq!(body["data"]["status"], "active");
    assert!(body["data"]["phone"].is_null());

    // Every seed email contains an "x" (example.com), so narrow on the address.
    let (status, body) = send(&app, "GET", "/api/users?search=X%40x.com&status=active", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![4]);

    let (_, body) = send(&app, "GET", "/api/users?search=x&status=active", None).await;
    assert_eq!(ids(&body), vec![1, 2, 4]);

    let (status, body) = send(
        &app,
        "PATCH",
        "/api/users/4/status",
        Some(json!({ "status": "archived" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (_, body) = send(&app, "GET", "/api/users/4", None).await;
    assert_eq!(body["data"]["status"], "active");

    let (status, body) = send(&app, "DELETE", "/api/users/4", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], 4);

    let (status, body) = send(&app, "GET", "/api/users/4", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "NotFound");
}

#[tokio::test]
async fn test_list_defaults_and_pagination_metadata() {
    let app = seeded_app();

    let (status, body) = send(&app, "GET", "/api/users", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![1, 2, 3]);
    assert_eq!(
        body["pagination"],
        json!({ "currentPage": 1, "totalPages": 1, "totalItems": 3, "itemsPerPage": 10 })
    );
}

#[tokio::test]
async fn test_list_second_page() {
    let app = seeded_app();

    let (_, body) = send(&app, "GET", "/api/users?page=2&limit=2", None).await;

    assert_eq!(ids(&body), vec![3]);
    assert_eq!(body["pagination"]["totalPages"], 2);
    assert_eq!(body["pagination"]["currentPage"], 2);
}

#[tokio::test]
async fn test_list_tolerates_malformed_numbers() {
    let app = seeded_app();

    let (status, body) = send(&app, "GET", "/api/users?page=abc&limit=-3", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![1, 2, 3]);
    assert_eq!(body["pagination"]["itemsPerPage"], 10);
}

#[tokio::test]
async fn test_list_out_of_range_page_is_empty() {
    let app = seeded_app();

    let (status, body) = send(&app, "GET", "/api/users?page=9", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(ids(&body).is_empty());
    assert_eq!(body["pagination"]["totalItems"], 3);
}

#[tokio::test]
async fn test_list_filters_by_status() {
    let app = seeded_app();

    let (_, body) = send(&app, "GET", "/api/users?status=inactive", None).await;

    assert_eq!(ids(&body), vec![3]);
}

#[tokio::test]
async fn test_create_requires_name_and_email() {
    let app = seeded_app();

    let (status, body) = send(&app, "POST", "/api/users", Some(json!({ "name": "Only" }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Missing required fields: name and email");

    let (_, body) = send(&app, "GET", "/api/users", None).await;
    assert_eq!(body["pagination"]["totalItems"], 3);
}

#[tokio::test]
async fn test_create_duplicate_email_conflicts() {
    let app = seeded_app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/users",
        Some(json!({ "name": "Copy", "email": "nguyenvana@example.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "Conflict");

    let (_, body) = send(&app, "GET", "/api/users", None).await;
    assert_eq!(body["pagination"]["totalItems"], 3);
}

#[tokio::test]
async fn test_create_on_empty_store_starts_at_one() {
    let app = app_with(MemoryStorage::new());

    let (status, body) = send(
        &app,
        "POST",
        "/api/users",
        Some(json!({ "name": "First", "email": "first@example.com", "phone": "" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["id"], 1);
    assert!(body["data"]["phone"].is_null());
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = seeded_app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, body) = send_request(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "BadRequest");
}

#[tokio::test]
async fn test_partial_update_only_touches_given_fields() {
    let app = seeded_app();
    let (_, before) = send(&app, "GET", "/api/users/1", None).await;

    let (status, after) = send(
        &app,
        "PUT",
        "/api/users/1",
        Some(json!({ "status": "inactive" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(after["data"]["name"], before["data"]["name"]);
    assert_eq!(after["data"]["email"], before["data"]["email"]);
    assert_eq!(after["data"]["phone"], before["data"]["phone"]);
    assert_eq!(after["data"]["createdAt"], before["data"]["createdAt"]);
    assert_eq!(after["data"]["status"], "inactive");
    assert_ne!(after["data"]["updatedAt"], before["data"]["updatedAt"]);
}

#[tokio::test]
async fn test_update_phone_presence() {
    let app = seeded_app();

    let (_, body) = send(&app, "PUT", "/api/users/1", Some(json!({ "phone": "" }))).await;
    assert_eq!(body["data"]["phone"], "");

    let (_, body) = send(&app, "PUT", "/api/users/1", Some(json!({ "name": "Renamed" }))).await;
    assert_eq!(body["data"]["phone"], "");
    assert_eq!(body["data"]["name"], "Renamed");

    let (_, body) = send(&app, "PUT", "/api/users/1", Some(json!({ "phone": null }))).await;
    assert!(body["data"]["phone"].is_null());
}

#[tokio::test]
async fn test_update_email_collisions() {
    let app = seeded_app();

    let (status, _) = send(
        &app,
        "PUT",
        "/api/users/1",
        Some(json!({ "email": "nguyenvana@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        "PUT",
        "/api/users/1",
        Some(json!({ "email": "levanc@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_update_missing_user() {
    let app = seeded_app();

    let (status, _) = send(&app, "PUT", "/api/users/77", Some(json!({ "name": "Ghost" }))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_missing_user_keeps_store() {
    let app = seeded_app();

    let (status, body) = send(&app, "DELETE", "/api/users/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);

    let (_, body) = send(&app, "GET", "/api/users", None).await;
    assert_eq!(body["pagination"]["totalItems"], 3);
}

#[tokio::test]
async fn test_non_numeric_id_is_not_found() {
    let app = seeded_app();

    let (status, _) = send(&app, "GET", "/api/users/abc", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_set_status() {
    let app = seeded_app();

    let (status, body) = send(
        &app,
        "PATCH",
        "/api/users/3/status",
        Some(json!({ "status": "active" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "active");

    let (status, _) = send(&app, "PATCH", "/api/users/3/status", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "PATCH",
        "/api/users/42/status",
        Some(json!({ "status": "inactive" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let app = seeded_app();
    let request = Request::builder()
        .uri("/api/users")
        .body(Body::empty())
        .unwrap();

    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_trailing_slash_is_served() {
    let app = seeded_app();

    let (status, body) = send(&app, "GET", "/api/users/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![1, 2, 3]);

    let (status, body) = send(&app, "GET", "/api/users/1/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], 1);
}
