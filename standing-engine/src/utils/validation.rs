//! Input validation helpers
//!
//! Text length limits for names, usernames and complaint text.

use shared::error::ErrorCode;

use crate::engine::{EngineError, EngineResult};

// ── Text length limits ──────────────────────────────────────────────

/// Names: employees, complaint categories
pub const MAX_NAME_LEN: usize = 200;

/// Descriptions, memos
pub const MAX_NOTE_LEN: usize = 500;

/// Usernames
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> EngineResult<()> {
    if value.trim().is_empty() {
        return Err(EngineError::validation(
            ErrorCode::RequiredField,
            format!("{field} must not be empty"),
        ));
    }
    validate_text_len(value, field, max_len)
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(value: Option<&str>, field: &str, max_len: usize) -> EngineResult<()> {
    match value {
        Some(v) => validate_text_len(v, field, max_len),
        None => Ok(()),
    }
}

fn validate_text_len(value: &str, field: &str, max_len: usize) -> EngineResult<()> {
    let len = value.chars().count();
    if len > max_len {
        return Err(EngineError::validation(
            ErrorCode::ValueOutOfRange,
            format!("{field} is too long ({len} chars, max {max_len})"),
        ));
    }
    Ok(())
}

/// Empty is allowed; otherwise a single `@` with text on both sides
pub fn validate_email(email: &str) -> EngineResult<()> {
    let email = email.trim();
    if email.is_empty() {
        return Ok(());
    }
    validate_text_len(email, "email", MAX_EMAIL_LEN)?;
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(())
        }
        _ => Err(EngineError::validation(
            ErrorCode::ValidationFailed,
            format!("invalid email: {email}"),
        )),
    }
}
