use unicode_normalization::UnicodeNormalization;

use crate::errors::domain::{DomainError, ValidationKind};

pub const MAX_NAME_CHARS: usize = 255;

/// Normalise a fish name (trim + NFKC) and check it.
pub fn validate_name(raw: &str) -> Result<String, DomainError> {
    let name: String = raw.trim().nfkc().collect();

    if name.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::InvalidName,
            "name must not be empty",
        ));
    }
    if name.chars().count() > MAX_NAME_CHARS {
        return Err(DomainError::validation(
            ValidationKind::InvalidName,
            format!("name must be at most {MAX_NAME_CHARS} characters"),
        ));
    }
    if name.chars().any(char::is_control) {
        return Err(DomainError::validation(
            ValidationKind::InvalidName,
            "name must not contain control characters",
        ));
    }
    Ok(name)
}
