//! Unified error system
//!
//! - [`ErrorCode`]: standardized codes for all error kinds
//! - [`AppError`]: rich error type with code, message, and details
//!
//! Storage and workflow layers keep their own `thiserror` enums and
//! convert into [`AppError`] at the store surface.
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::validation("quantity must be at least 1");
//! assert_eq!(err.code, ErrorCode::ValidationFailed);
//!
//! let err = AppError::not_found("Contractor").with_detail("id", "42");
//! assert_eq!(err.code, ErrorCode::NotFound);
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Standardized error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Field-level validation failed
    ValidationFailed,
    /// Referenced entity does not exist
    NotFound,
    /// Transfer requested with an empty selection
    NoSelection,
    /// Transfer rejected: selected entries have missing required fields
    IncompleteFields,
    /// Stored payload could not be decoded (non-fatal, treated as empty)
    DecodeFailed,
    /// Underlying key-value store failed
    StorageFailure,
    /// Unexpected internal error
    InternalError,
}

impl ErrorCode {
    /// Default human-readable message for this code
    pub fn message(&self) -> &'static str {
        match self {
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::NoSelection => "No entries selected",
            Self::IncompleteFields => "Selected entries have missing required fields",
            Self::DecodeFailed => "Stored payload could not be decoded",
            Self::StorageFailure => "Storage operation failed",
            Self::InternalError => "Internal error",
        }
    }
}

/// Application error with structured error code and details
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    pub details: Option<HashMap<String, Value>>,
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a not found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::NotFound, format!("{} not found", r))
            .with_detail("resource", r)
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::StorageFailure, msg)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }
}
