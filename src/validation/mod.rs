//! Validation helpers for `issue_tracker`.
//!
//! These routines enforce request-level constraints before anything reaches
//! the store. The store itself trusts its input.

use crate::error::ValidationError;
use crate::model::{IssueUpdate, NewIssue, Patch};

/// Upper bound for `pageSize` unless configured otherwise.
pub const DEFAULT_MAX_PAGE_SIZE: i64 = 100;

/// Validates issue payloads.
pub struct IssueValidator;

impl IssueValidator {
    /// Validate a creation payload.
    ///
    /// # Errors
    ///
    /// Returns a `Vec<ValidationError>` if any validation rules are violated.
    pub fn validate_new(new: &NewIssue) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        // Title: Required, at least one character. Whitespace counts.
        if new.title.is_empty() {
            errors.push(ValidationError::new("title", "cannot be empty"));
        }

        finish(errors)
    }

    /// Validate a partial update payload.
    ///
    /// A supplied title must be non-empty; `null` is allowed and ignored.
    ///
    /// # Errors
    ///
    /// Returns a `Vec<ValidationError>` if any validation rules are violated.
    pub fn validate_update(update: &IssueUpdate) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Patch::Value(title) = &update.title {
            if title.is_empty() {
                errors.push(ValidationError::new("title", "cannot be empty"));
            }
        }

        finish(errors)
    }
}

/// Validates list pagination parameters.
pub struct PageValidator;

impl PageValidator {
    /// `page >= 1` and `1 <= page_size <= max_page_size`.
    ///
    /// # Errors
    ///
    /// Returns a `Vec<ValidationError>` naming the offending wire parameters.
    pub fn validate(
        page: i64,
        page_size: i64,
        max_page_size: i64,
    ) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if page < 1 {
            errors.push(ValidationError::new("page", "must be >= 1"));
        }
        if page_size < 1 {
            errors.push(ValidationError::new("pageSize", "must be >= 1"));
        } else if page_size > max_page_size {
            errors.push(ValidationError::new(
                "pageSize",
                format!("must be <= {max_page_size}"),
            ));
        }

        finish(errors)
    }
}

fn finish(errors: Vec<ValidationError>) -> Result<(), Vec<ValidationError>> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
