//! Store failures and their mapping onto HTTP error payloads.
//!
//! Handlers never expose the underlying database message: the detail is logged
//! here and callers receive a stable code with a fixed message.

use actix_web::{error::JsonPayloadError, http::StatusCode, HttpResponse, ResponseError};
use log::{error, warn};
use serde::{Deserialize, Serialize};

/// Errors raised by a [`crate::store::UserStore`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached (pool exhausted or closed, I/O, TLS).
    #[error("store unavailable: {message}")]
    Unavailable { message: String },

    /// The store was reached but rejected or failed the statement.
    #[error("store query failed: {message}")]
    Query { message: String },
}

impl StoreError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Protocol(_)
            | sqlx::Error::Configuration(_) => Self::unavailable(err.to_string()),
            other => Self::query(other.to_string()),
        }
    }
}

/// Machine-readable error codes returned to HTTP callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidRequest,
    StoreUnavailable,
    StoreQueryFailed,
}

/// Wire shape of every error response: `{"error": ..., "code": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: ErrorCode,
}

/// Error returned from request handlers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    code: ErrorCode,
    message: &'static str,
}

impl ApiError {
    pub const fn invalid_request() -> Self {
        Self {
            code: ErrorCode::InvalidRequest,
            message: "request body must be a JSON object",
        }
    }

    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    pub const fn message(&self) -> &'static str {
        self.message
    }

    /// Rejection handler for `web::JsonConfig` so malformed bodies share the
    /// service's error envelope.
    pub fn from_json_rejection(
        err: JsonPayloadError,
        _req: &actix_web::HttpRequest,
    ) -> actix_web::Error {
        warn!("rejected request body: {err}");
        Self::invalid_request().into()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        error!("{err}");
        match err {
            StoreError::Unavailable { .. } => Self {
                code: ErrorCode::StoreUnavailable,
                message: "the user store is unavailable",
            },
            StoreError::Query { .. } => Self {
                code: ErrorCode::StoreQueryFailed,
                message: "the user store could not complete the request",
            },
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self.code {
            ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorCode::StoreUnavailable | ErrorCode::StoreQueryFailed => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.message.to_owned(),
            code: self.code,
        })
    }
}
