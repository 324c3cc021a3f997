//! Input validation helpers
//!
//! Centralized text length constants and validation functions shared by the
//! order lifecycle and the provisioning handlers.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: customer, chef, table, menu item
pub const MAX_NAME_LEN: usize = 200;

/// Short identifiers: phone number, item category
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Delivery addresses
pub const MAX_ADDRESS_LEN: usize = 500;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an integer is strictly positive.
pub fn validate_positive(value: i32, field: &str) -> Result<(), AppError> {
    if value <= 0 {
        return Err(AppError::validation(format!(
            "{field} must be positive (got {value})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::ErrorCode;

    #[test]
    fn test_required_text_rejects_blank() {
        let err = validate_required_text("   ", "name", MAX_NAME_LEN).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.message, "name must not be empty");
    }

    #[test]
    fn test_required_text_rejects_too_long() {
        let long = "x".repeat(MAX_SHORT_TEXT_LEN + 1);
        let err = validate_required_text(&long, "phoneNumber", MAX_SHORT_TEXT_LEN).unwrap_err();
        assert!(err.message.contains("too long"));
        assert!(validate_required_text("ok", "phoneNumber", MAX_SHORT_TEXT_LEN).is_ok());
    }

    #[test]
    fn test_positive() {
        assert!(validate_positive(1, "averageTime").is_ok());
        assert!(validate_positive(0, "averageTime").is_err());
        assert!(validate_positive(-3, "averageTime").is_err());
    }
}
