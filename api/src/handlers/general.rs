//! Stateless endpoints that never touch the user store.

use std::collections::BTreeMap;

use axum::{
    Json,
    body::Bytes,
    extract::{OriginalUri, Query, State, rejection::QueryRejection},
    http::{HeaderMap, Method, StatusCode, header},
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use frit_common::views::ApiResponse;
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::{context::ApiContext, error::ApiError};

const SERVER_NAME: &str = "Frit Backend";

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EchoData {
    /// The request body, parsed as JSON when possible.
    #[schema(value_type = Object)]
    pub received_body: Value,
    pub received_query: BTreeMap<String, String>,
    pub user_agent: Option<String>,
    pub content_type: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub method: String,
    pub url: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiStatus {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub uptime: f64,
    pub version: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfo {
    pub server_name: String,
    pub version: String,
    pub platform: String,
    pub architecture: String,
    pub uptime: f64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WelcomeResponse {
    pub message: String,
    pub version: String,
    pub documentation: String,
    pub health: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteNotFound {
    pub success: bool,
    pub message: String,
    pub requested_url: String,
    pub method: String,
    pub timestamp: DateTime<Utc>,
}

fn header_str(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// JSON bodies come back as JSON, anything else as a string.
fn echo_body(body: &[u8]) -> Value {
    if body.is_empty() {
        return Value::Object(Default::default());
    }

    serde_json::from_slice(body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()))
}

#[utoipa::path(
    post,
    path = "/api/test",
    tags = ["general"],
    responses((status = 200, description = "What the server received", body = ApiResponse<EchoData>))
)]
pub async fn echo_test(
    method: Method,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    query: Result<Query<BTreeMap<String, String>>, QueryRejection>,
    body: Bytes,
) -> Result<Json<ApiResponse<EchoData>>, ApiError> {
    let Query(query) = query?;

    Ok(Json(ApiResponse::ok(
        "Test endpoint is working",
        EchoData {
            received_body: echo_body(&body),
            received_query: query,
            user_agent: header_str(&headers, header::USER_AGENT),
            content_type: header_str(&headers, header::CONTENT_TYPE),
            timestamp: Utc::now(),
            method: method.to_string(),
            url: uri.to_string(),
        },
    )))
}

#[utoipa::path(
    get,
    path = "/api/status",
    tags = ["general"],
    responses((status = 200, description = "API status", body = ApiResponse<ApiStatus>))
)]
pub async fn api_status(State(ctx): State<ApiContext>) -> Json<ApiResponse<ApiStatus>> {
    Json(ApiResponse::ok(
        "API is operating normally",
        ApiStatus {
            status: "active".into(),
            timestamp: Utc::now(),
            uptime: ctx.uptime(),
            version: env!("CARGO_PKG_VERSION").into(),
        },
    ))
}

#[utoipa::path(
    get,
    path = "/api/info",
    tags = ["general"],
    responses((status = 200, description = "Server information", body = ApiResponse<ServerInfo>))
)]
pub async fn api_info(State(ctx): State<ApiContext>) -> Json<ApiResponse<ServerInfo>> {
    Json(ApiResponse::ok(
        "Server information retrieved successfully",
        ServerInfo {
            server_name: SERVER_NAME.into(),
            version: env!("CARGO_PKG_VERSION").into(),
            platform: std::env::consts::OS.into(),
            architecture: std::env::consts::ARCH.into(),
            uptime: ctx.uptime(),
            timestamp: Utc::now(),
        },
    ))
}

#[utoipa::path(
    get,
    path = "/",
    tags = ["general"],
    responses((status = 200, description = "Entry point", body = WelcomeResponse))
)]
pub async fn root() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: format!("Welcome to the {SERVER_NAME} API"),
        version: env!("CARGO_PKG_VERSION").into(),
        documentation: "/api/docs".into(),
        health: "/health".into(),
        timestamp: Utc::now(),
    })
}

/// Fallback for every path no route claims.
pub async fn route_not_found(method: Method, OriginalUri(uri): OriginalUri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(RouteNotFound {
            success: false,
            message: "Endpoint not found".into(),
            requested_url: uri.to_string(),
            method: method.to_string(),
            timestamp: Utc::now(),
        }),
    )
}
