//! Validation utilities for the Product Pricing Planner

use validator::ValidationError;

// ============================================================================
// Account Validations
// ============================================================================

/// bcrypt only reads the first 72 bytes of a password, so longer inputs
/// are rejected outright instead of being silently truncated.
pub const PASSWORD_MAX_BYTES: usize = 72;

/// Validate a password against the bcrypt length cap. The limit is in
/// bytes, not characters; multibyte input hits it sooner.
pub fn validate_password_bytes(password: &str) -> Result<(), ValidationError> {
    if password.len() > PASSWORD_MAX_BYTES {
        let mut error = ValidationError::new("password_too_long");
        error.message = Some("Password must be at most 72 bytes".into());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_passwords_up_to_the_cap() {
        assert!(validate_password_bytes("hunter2").is_ok());
        assert!(validate_password_bytes(&"a".repeat(72)).is_ok());
    }

    #[test]
    fn rejects_passwords_over_the_cap() {
        assert!(validate_password_bytes(&"a".repeat(73)).is_err());
    }

    #[test]
    fn cap_counts_bytes_not_characters() {
        // 40 two-byte characters is 80 bytes
        assert!(validate_password_bytes(&"ü".repeat(40)).is_err());
        assert!(validate_password_bytes(&"ü".repeat(36)).is_ok());
    }
}
