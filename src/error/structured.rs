//! Structured error output.
//!
//! Provides machine-parseable error information with:
//! - Error codes for categorization
//! - Hints for self-correction
//! - Retryability flags
//! - Context for debugging

use crate::error::TrackerError;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Machine-readable error codes.
///
/// These codes are stable and can be used for programmatic error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // === Validation Errors (exit code 4) ===
    /// Field validation failed
    ValidationFailed,
    /// Invalid status value
    InvalidStatus,
    /// Invalid priority value
    InvalidPriority,

    // === Config Errors (exit code 7) ===
    /// Configuration error
    ConfigError,

    // === I/O Errors (exit code 8) ===
    /// File or socket I/O error
    IoError,
    /// JSON serialization error
    JsonError,
    /// YAML parsing error
    YamlError,

    // === Internal Errors (exit code 1) ===
    /// Unexpected internal error
    InternalError,
}

impl ErrorCode {
    /// Get the string representation for JSON output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationFailed => "VALIDATION_FAILED",
            Self::InvalidStatus => "INVALID_STATUS",
            Self::InvalidPriority => "INVALID_PRIORITY",
            Self::ConfigError => "CONFIG_ERROR",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
            Self::YamlError => "YAML_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Map an error onto its code.
    #[must_use]
    pub const fn from_error(err: &TrackerError) -> Self {
        match err {
            TrackerError::Validation { .. } | TrackerError::ValidationErrors { .. } => {
                Self::ValidationFailed
            }
            TrackerError::InvalidStatus { .. } => Self::InvalidStatus,
            TrackerError::InvalidPriority { .. } => Self::InvalidPriority,
            TrackerError::Config(_) => Self::ConfigError,
            TrackerError::Io(_) => Self::IoError,
            TrackerError::Json(_) => Self::JsonError,
            TrackerError::Yaml(_) => Self::YamlError,
            TrackerError::Other(_) => Self::InternalError,
        }
    }

    /// Whether fixing the input and retrying can succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ValidationFailed | Self::InvalidStatus | Self::InvalidPriority
        )
    }

    /// Get the exit code for this error category.
    ///
    /// - 1: Internal/unknown errors
    /// - 4: Validation errors
    /// - 7: Config errors
    /// - 8: I/O errors
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::ValidationFailed | Self::InvalidStatus | Self::InvalidPriority => 4,
            Self::ConfigError => 7,
            Self::IoError | Self::JsonError | Self::YamlError => 8,
            Self::InternalError => 1,
        }
    }
}

/// A structured error suitable for JSON or terminal output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// Machine-readable error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional hint for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Whether the operation can be retried
    pub retryable: bool,
    /// Additional context data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
}

impl StructuredError {
    /// Create a new structured error from a `TrackerError`.
    #[must_use]
    pub fn from_error(err: &TrackerError) -> Self {
        let code = ErrorCode::from_error(err);
        let context = err
            .field_errors()
            .map(|errors| json!({ "errors": errors }));

        Self {
            code,
            message: err.to_string(),
            hint: err.suggestion().map(str::to_string),
            retryable: code.is_retryable(),
            context,
        }
    }

    /// Format as JSON for machine consumption.
    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({
            "error": {
                "code": self.code.as_str(),
                "message": self.message,
                "hint": self.hint,
                "retryable": self.retryable,
                "context": self.context,
            }
        })
    }

    /// Format for human-readable output.
    #[must_use]
    pub fn to_human(&self, color: bool) -> String {
        let mut output = String::new();

        if color {
            output.push_str("\x1b[31mError:\x1b[0m ");
        } else {
            output.push_str("Error: ");
        }

        output.push_str(&self.message);

        if let Some(hint) = &self.hint {
            output.push('\n');
            if color {
                output.push_str("\x1b[33mHint:\x1b[0m ");
            } else {
                output.push_str("Hint: ");
            }
            output.push_str(hint);
        }

        output
    }
}
