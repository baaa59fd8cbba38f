//! Authentication tests
//!
//! Tests for token issuance and credential validation:
//! - Property 1: Issued tokens decode back to the same subject
//! - Property 2: Tokens signed with a different secret are rejected
//! - Property 3: Expired tokens are rejected
//! - Property 4: Passwords are capped at 72 bytes, not characters

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use shared::validation::{validate_password_bytes, PASSWORD_MAX_BYTES};
use uuid::Uuid;

/// Token claims as carried on the wire
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: i64,
    iat: i64,
}

/// Helper to issue a token for a user id with the given lifetime
fn issue_token(user_id: Uuid, secret: &str, lifetime_seconds: i64) -> String {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        exp: (now + Duration::seconds(lifetime_seconds)).timestamp(),
        iat: now.timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_token_round_trips_subject() {
        let user_id = Uuid::new_v4();
        let token = issue_token(user_id, "test-secret", 3600);

        let decoded = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"test-secret"),
            &Validation::default(),
        )
        .unwrap();

        assert_eq!(decoded.claims.sub, user_id.to_string());
        assert!(decoded.claims.exp > decoded.claims.iat);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = issue_token(Uuid::new_v4(), "test-secret", 3600);

        let result = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"another-secret"),
            &Validation::default(),
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // Well past the default leeway
        let token = issue_token(Uuid::new_v4(), "test-secret", -3600);

        let result = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"test-secret"),
            &Validation::default(),
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_password_at_cap_is_accepted() {
        let password = "a".repeat(PASSWORD_MAX_BYTES);
        assert!(validate_password_bytes(&password).is_ok());
    }

    #[test]
    fn test_password_over_cap_is_rejected() {
        let password = "a".repeat(PASSWORD_MAX_BYTES + 1);
        assert!(validate_password_bytes(&password).is_err());
    }

    #[test]
    fn test_cap_counts_bytes_not_characters() {
        // 40 two-byte characters exceed the cap at 40 characters
        let long = "ü".repeat(40);
        assert_eq!(long.chars().count(), 40);
        assert!(validate_password_bytes(&long).is_err());

        let short = "ü".repeat(36);
        assert!(validate_password_bytes(&short).is_ok());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property 1: Any subject survives the encode/decode round trip
        #[test]
        fn prop_subject_survives_round_trip(bytes in prop::array::uniform16(0u8..)) {
            let user_id = Uuid::from_bytes(bytes);
            let token = issue_token(user_id, "prop-secret", 3600);

            let decoded = decode::<Claims>(
                &token,
                &DecodingKey::from_secret(b"prop-secret"),
                &Validation::default(),
            )
            .unwrap();

            prop_assert_eq!(decoded.claims.sub, user_id.to_string());
        }

        /// Property 4: Acceptance depends only on the byte length
        #[test]
        fn prop_password_accepted_iff_within_byte_cap(password in ".{0,30}") {
            let accepted = validate_password_bytes(&password).is_ok();
            prop_assert_eq!(accepted, password.len() <= PASSWORD_MAX_BYTES);
        }
    }
}
