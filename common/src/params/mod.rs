//! Input parameters for the various endpoints of the API.
//!
//! Query strings and bodies arrive loosely typed. The types here keep every
//! field optional so a malformed request reaches our own validation instead
//! of failing inside the extractor, then convert into the strict inputs the
//! store works with.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::{IntoParams, ToSchema};

use crate::views::UserStatus;

mod user;
pub use user::*;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;

/// Rejections produced while validating client input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamsError {
    #[error("Missing required fields: name and email")]
    MissingRequired,

    #[error("Invalid status. Accepted values: {}", accepted_statuses())]
    InvalidStatus,
}

fn accepted_statuses() -> String {
    UserStatus::ALL
        .iter()
        .map(UserStatus::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A resolved page request. `page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct PaginationParams {
    pub page: u64,

    /// The maximum number of results to return.
    pub limit: u64,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PaginationParams {
    /// Index of the first record on this page.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

/// Query string accepted by the user listing endpoint.
#[derive(Debug, Clone, Default, Deserialize, Serialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ListUsersParams {
    /// 1-based page number. Defaults to 1.
    pub page: Option<String>,

    /// Page size. Defaults to 10.
    pub limit: Option<String>,

    /// Only return users with this exact status.
    pub status: Option<String>,

    /// Case-insensitive substring matched against name and email.
    pub search: Option<String>,
}

impl ListUsersParams {
    /// Resolve `page` and `limit`. Anything that is not a positive integer
    /// falls back to the default instead of failing the request.
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: positive_or(self.page.as_deref(), DEFAULT_PAGE),
            limit: positive_or(self.limit.as_deref(), DEFAULT_LIMIT),
        }
    }

    pub fn status(&self) -> Option<String> {
        non_empty(self.status.as_deref())
    }

    pub fn search(&self) -> Option<String> {
        non_empty(self.search.as_deref())
    }
}

fn positive_or(raw: Option<&str>, default: u64) -> u64 {
    raw.and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

fn non_empty(raw: Option<&str>) -> Option<String> {
    raw.filter(|v| !v.is_empty()).map(str::to_string)
}
