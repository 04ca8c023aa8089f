//! Error types for the service layer.
//!
//! The core algorithms never fail; everything here is raised at the boundary,
//! either before a request reaches the core or after a result comes back
//! unusable.

use thiserror::Error;

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors reported to callers of the conversion and reading services.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ServiceError {
    /// A request field is missing, malformed or out of range.
    #[error("Invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    /// The core produced a non-finite or inconsistent value.
    #[error("Computation failed: {0}")]
    Computation(String),
}

impl ServiceError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ServiceError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn computation(message: impl Into<String>) -> Self {
        ServiceError::Computation(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ServiceError::Validation { .. })
    }
}

/// Reject a non-finite core result.
pub(crate) fn ensure_finite(quantity: &str, value: f64) -> ServiceResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ServiceError::computation(format!(
            "{} is not a finite number ({})",
            quantity, value
        )))
    }
}

/// Round to a fixed number of decimals for presentation.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}
