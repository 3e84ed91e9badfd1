//! Application error types
//!
//! Unified error handling for the binary and the wiring layer.

use cheer_core::DomainError;
use serde::Serialize;
use std::fmt;

use crate::config::ConfigError;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    // Internal errors
    #[error("Internal error")]
    Internal(#[source] anyhow::Error),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl AppError {
    /// Process exit code for this error
    ///
    /// Follows the `sysexits.h` convention where one applies.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            // EX_USAGE / EX_DATAERR
            Self::Validation(_) | Self::InvalidInput(_) => 64,

            // EX_UNAVAILABLE
            Self::Storage(_) => 69,

            // EX_SOFTWARE
            Self::Internal(_) => 70,

            // EX_CONFIG
            Self::Config(_) => 78,

            Self::Domain(e) => {
                if e.is_validation() {
                    64
                } else if e.is_drift() {
                    // EX_DATAERR: the request contradicts stored state
                    65
                } else if e.is_transient() {
                    // EX_TEMPFAIL
                    75
                } else {
                    70
                }
            }
        }
    }

    /// Get error code for machine-readable output
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Domain(e) => e.code(),
        }
    }

    /// Check if retrying the same command later may succeed
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Storage(_) => true,
            Self::Domain(e) => e.is_transient(),
            _ => false,
        }
    }

    /// Create a validation error
    #[must_use]
    pub fn validation(msg: impl fmt::Display) -> Self {
        Self::Validation(msg.to_string())
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

/// Error structure for machine-readable (JSON) output
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    pub retryable: bool,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        Self {
            code: err.error_code().to_string(),
            message: err.to_string(),
            retryable: err.is_retryable(),
        }
    }
}

impl From<AppError> for ErrorResponse {
    fn from(err: AppError) -> Self {
        Self::from(&err)
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
