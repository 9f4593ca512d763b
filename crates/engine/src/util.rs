//! Internal helpers for model validation and conversion.
//!
//! These utilities are **not** part of the public API. They centralize
//! validation and mapping logic so the engine enforces consistent invariants.

use uuid::Uuid;

use crate::{EngineError, ResultEngine};

/// Validate a monetary input: it must be a finite number `>= 0`.
pub(crate) fn validate_amount(value: f64, label: &str) -> ResultEngine<f64> {
    if !value.is_finite() {
        return Err(EngineError::InvalidAmount(format!(
            "{label} must be a finite number"
        )));
    }
    if value < 0.0 {
        return Err(EngineError::InvalidAmount(format!(
            "{label} must be >= 0, got {value}"
        )));
    }
    Ok(value)
}

/// Trim a required name, failing when nothing is left.
pub(crate) fn normalize_required_name(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidName(format!(
            "{label} name must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// Emails are used as user ids; compare them case-insensitively.
pub(crate) fn normalize_email(value: &str) -> ResultEngine<String> {
    let email = value.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(EngineError::InvalidName(format!("invalid email: {value:?}")));
    }
    Ok(email)
}

/// Parse a UUID from storage and return a labeled error on failure.
pub(crate) fn parse_uuid(value: &str, label: &str) -> ResultEngine<Uuid> {
    Uuid::parse_str(value).map_err(|_| EngineError::KeyNotFound(format!("invalid {label} id")))
}
