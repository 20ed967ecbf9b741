//! Output views for the various endpoints of the API.
//!
//! Every response body is wrapped in the same envelope: successful calls
//! produce an [`ApiResponse`], failed calls an [`ApiErrorResponse`]. Both
//! carry `success` and `message` so a client can branch on a single field.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

mod user;
pub use user::*;

/// The envelope wrapped around every successful response.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Always `true` for this envelope.
    pub success: bool,

    /// A human-readable summary of what happened.
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Present on list endpoints only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            pagination: None,
        }
    }

    pub fn paginated(message: impl Into<String>, data: T, pagination: Pagination) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            pagination: Some(pagination),
        }
    }
}

/// Page metadata attached to list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// The 1-based page that was requested.
    pub current_page: u64,

    /// `ceil(total_items / items_per_page)`.
    pub total_pages: u64,

    /// How many records matched the filters, across all pages.
    pub total_items: u64,

    pub items_per_page: u64,
}

impl Pagination {
    /// Build the metadata for `total_items` matches split into pages of
    /// `items_per_page`. A zero page size yields zero pages.
    pub fn new(current_page: u64, items_per_page: u64, total_items: u64) -> Self {
        let total_pages = match items_per_page {
            0 => 0,
            per_page => total_items.div_ceil(per_page),
        };

        Self {
            current_page,
            total_pages,
            total_items,
            items_per_page,
        }
    }
}

/// An error response for an API endpoint. This is used to return errors to the
/// client in a consistent format.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    /// Always `false` for this envelope.
    pub success: bool,

    /// An optional error code that can be used to identify the type of error
    /// that occurred.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// A human-readable message describing the error that occurred.
    pub message: String,

    /// The underlying failure, only filled in for internal errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(Pagination::new(1, 10, 0).total_pages, 0);
        assert_eq!(Pagination::new(1, 10, 10).total_pages, 1);
        assert_eq!(Pagination::new(1, 10, 11).total_pages, 2);
        assert_eq!(Pagination::new(1, 2, 3).total_pages, 2);
    }

    #[test]
    fn test_zero_page_size_has_no_pages() {
        assert_eq!(Pagination::new(1, 0, 5).total_pages, 0);
    }

    #[test]
    fn test_envelope_omits_absent_fields() {
        let body = serde_json::to_value(ApiResponse::ok("done", 7)).unwrap();

        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "done");
        assert_eq!(body["data"], 7);
        assert!(body.get("pagination").is_none());
    }

    #[test]
    fn test_pagination_is_camel_case() {
        let body = serde_json::to_value(ApiResponse::paginated(
            "listed",
            Vec::<u8>::new(),
            Pagination::new(2, 5, 12),
        ))
        .unwrap();

        assert_eq!(body["pagination"]["currentPage"], 2);
        assert_eq!(body["pagination"]["totalPages"], 3);
        assert_eq!(body["pagination"]["totalItems"], 12);
        assert_eq!(body["pagination"]["itemsPerPage"], 5);
    }

    #[test]
    fn test_error_envelope_skips_empty_details() {
        let body = serde_json::to_value(ApiErrorResponse {
            success: false,
            code: Some("NotFound".into()),
            message: "missing".into(),
            error: None,
        })
        .unwrap();

        assert_eq!(body["success"], false);
        assert!(body.get("error").is_none());
    }
}
