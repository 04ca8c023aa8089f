//! HTTP error handling and response types.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::services::ServiceError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Service-layer failure (validation or computation)
    Service(ServiceError),
    /// Request body could not be decoded
    BadRequest(String),
    /// No reading has been published yet
    NotReady(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Service(ServiceError::Validation { .. }) | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Service(ServiceError::Computation(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotReady(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = match self {
            AppError::Service(ServiceError::Validation { field, reason }) => {
                let message = format!("Invalid {}: {}", field, reason);
                ApiError::new("VALIDATION_ERROR", message).with_details(field)
            }
            AppError::Service(e @ ServiceError::Computation(_)) => {
                ApiError::new("COMPUTATION_ERROR", e.to_string())
            }
            AppError::BadRequest(msg) => ApiError::new("VALIDATION_ERROR", msg),
            AppError::NotReady(msg) => ApiError::new("NOT_READY", msg),
        };

        if status.is_server_error() && status != StatusCode::SERVICE_UNAVAILABLE {
            error!(code = %error.code, message = %error.message, "Request failed");
        } else {
            warn!(code = %error.code, message = %error.message, "Request rejected");
        }

        (status, Json(error)).into_response()
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        AppError::Service(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}
