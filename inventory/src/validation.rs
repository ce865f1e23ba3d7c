//! Input validation helpers
//!
//! Centralized text length constants and validation functions. The
//! store applies these on every field patch; the transfer workflow has
//! its own completeness rules on top.

use shared::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: product, contractor
pub const MAX_NAME_LEN: usize = 200;

/// SKU / article codes
pub const MAX_ARTICLE_LEN: usize = 100;

/// Free-text hints
pub const MAX_HINT_LEN: usize = 500;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    validate_text(value, field, max_len)
}

/// Validate that a string is within the length limit (empty allowed).
pub fn validate_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}
