use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::IntoResponse,
};
use frit_common::{params::ParamsError, views::ApiErrorResponse};
use frit_db::storage::StoreError;
use thiserror::Error;

const INTERNAL_MESSAGE: &str = "Something went wrong on our end. Please try again later.";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found")]
    NotFound,

    #[error(transparent)]
    Params(#[from] ParamsError),

    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error(transparent)]
    Storage(#[from] StoreError),

    #[error("Handler panicked: {0}")]
    Panicked(String),

    #[error(transparent)]
    InternalAnyhow(#[from] anyhow::Error),
}

impl ApiError {
    pub fn not_found() -> Self {
        Self::NotFound
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Params(_) | Self::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            Self::Storage(se) => match se {
                StoreError::NotFound(_) => StatusCode::NOT_FOUND,
                StoreError::EmailTaken(_) => StatusCode::CONFLICT,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Panicked(_) | Self::InternalAnyhow(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self.status_code() {
            StatusCode::NOT_FOUND => "NotFound",
            StatusCode::BAD_REQUEST => "BadRequest",
            StatusCode::CONFLICT => "Conflict",
            _ => "InternalError",
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::MalformedRequest(rejection.body_text())
    }
}

impl From<ApiError> for ApiErrorResponse {
    fn from(err: ApiError) -> Self {
        let internal = err.status_code().is_server_error();

        ApiErrorResponse {
            success: false,

            code: Some(err.code().into()),

            message: match &err {
                ApiError::NotFound => "No user found with this ID.".into(),
                ApiError::Params(pe) => pe.to_string(),
                ApiError::MalformedRequest(_) => err.to_string(),
                ApiError::Storage(se) => match se {
                    StoreError::NotFound(_) => "No user found with this ID.".into(),
                    StoreError::EmailTaken(_) => "Email already exists.".into(),
                    _ => INTERNAL_MESSAGE.into(),
                },
                ApiError::Panicked(_) | ApiError::InternalAnyhow(_) => INTERNAL_MESSAGE.into(),
            },

            error: internal.then(|| err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status_code = self.status_code();

        if status_code.is_server_error() {
            tracing::error!("Error returned by handler: {self}");
        } else {
            tracing::warn!(status = status_code.as_u16(), "Request rejected: {self}");
        }

        (status_code, Json(Into::<ApiErrorResponse>::into(self))).into_response()
    }
}
