//! Error types and handling for `issue_tracker`.
//!
//! # Design
//!
//! - Uses `thiserror` for derive-based error types
//! - Supports `anyhow` integration for startup plumbing
//! - The store never errors; not-found is reported as `Option::None` and
//!   turned into a 404 by the HTTP layer
//! - Provides structured output for the CLI and HTTP layers

mod structured;

pub use structured::{ErrorCode, StructuredError};

use thiserror::Error;

/// Primary error type for `issue_tracker` operations.
#[derive(Error, Debug)]
pub enum TrackerError {
    // === Validation Errors ===
    /// Field validation failed.
    #[error("Validation failed: {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Multiple validation errors occurred.
    #[error("Validation errors: {errors:?}")]
    ValidationErrors { errors: Vec<ValidationError> },

    /// Invalid status value.
    #[error("Invalid status: {status}")]
    InvalidStatus { status: String },

    /// Invalid priority value.
    #[error("Invalid priority: {priority}")]
    InvalidPriority { priority: String },

    // === Configuration Errors ===
    /// Configuration value or file error.
    #[error("Configuration error: {0}")]
    Config(String),

    // === I/O Errors ===
    /// File system or socket I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Wrapped anyhow error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// A single field validation error.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// The reason for the validation failure.
    pub message: String,
}

impl ValidationError {
    /// Create a new validation error.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

impl TrackerError {
    /// Human-friendly suggestion for fixing this error.
    #[must_use]
    pub const fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::InvalidStatus { .. } => Some("Valid statuses: open, in_progress, resolved, closed"),
            Self::InvalidPriority { .. } => Some("Valid priorities: low, medium, high, critical"),
            Self::Config(_) => Some("Check issue-tracker.yaml and ISSUES_* environment variables"),
            _ => None,
        }
    }

    /// Get the process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        ErrorCode::from_error(self).exit_code()
    }

    /// Flatten into per-field validation errors, if this is a validation error.
    #[must_use]
    pub fn field_errors(&self) -> Option<Vec<ValidationError>> {
        match self {
            Self::Validation { field, reason } => Some(vec![ValidationError::new(field, reason)]),
            Self::ValidationErrors { errors } => Some(errors.clone()),
            Self::InvalidStatus { status } => Some(vec![ValidationError::new(
                "status",
                format!("invalid value '{status}'"),
            )]),
            Self::InvalidPriority { priority } => Some(vec![ValidationError::new(
                "priority",
                format!("invalid value '{priority}'"),
            )]),
            _ => None,
        }
    }

    /// Create a validation error for a specific field.
    #[must_use]
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create from multiple validation errors.
    #[must_use]
    pub fn from_validation_errors(errors: Vec<ValidationError>) -> Self {
        if errors.len() == 1 {
            let err = &errors[0];
            Self::Validation {
                field: err.field.clone(),
                reason: err.message.clone(),
            }
        } else {
            Self::ValidationErrors { errors }
        }
    }
}

/// Result type using `TrackerError`.
pub type Result<T> = std::result::Result<T, TrackerError>;
