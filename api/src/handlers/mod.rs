use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use frit_db::storage::Storage;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{context::ApiContext, error::ApiError};

pub mod general;
pub mod users;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    /// Seconds since the server started.
    pub uptime: f64,
    pub environment: String,
    pub version: String,
}

#[utoipa::path(
    get,
    path = "/health",
    tags = ["general"],
    responses((status = 200, description = "The server and its store are reachable", body = HealthResponse))
)]
pub async fn health_check(State(ctx): State<ApiContext>) -> Result<Json<HealthResponse>, ApiError> {
    ctx.db.ping().await?;

    Ok(Json(HealthResponse {
        status: "OK".into(),
        message: "Frit backend is running".into(),
        timestamp: Utc::now(),
        uptime: ctx.uptime(),
        environment: ctx.config.environment.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}
