use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::Envelope;
use models::errors::ModelError;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

pub const NOT_FOUND_MESSAGE: &str = "User not found";
pub const INVALID_ID_MESSAGE: &str = "Invalid user id";

/// Failure surfaced to HTTP callers as `{success: false, message}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    /// Carries the public message only; the cause is logged where it is mapped.
    #[error("{0}")]
    Internal(&'static str),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Map a service failure; `failure` is the message shown for storage errors.
    pub fn from_service(err: ServiceError, failure: &'static str) -> Self {
        match err {
            ServiceError::Model(ModelError::Validation(msg)) => {
                warn!(err = %msg, "rejected request");
                ApiError::Validation(msg)
            }
            ServiceError::NotFound(_) => ApiError::NotFound(NOT_FOUND_MESSAGE.into()),
            e => {
                error!(err = %e, "{failure}");
                ApiError::Internal(failure)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(Envelope::failure(self.to_string()))).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
