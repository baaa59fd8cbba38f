//! Authentication service for user registration, login, and token issuance

use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::User;
use shared::validation::validate_password_bytes;

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    db: PgPool,
    jwt_secret: String,
    access_token_expiry: i64,
}

/// Input for registering a new account
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterInput {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(custom = "validate_password_bytes")]
    pub password: String,
    pub full_name: Option<String>,
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // User ID
    pub exp: i64,
    pub iat: i64,
}

/// Bearer token issued on login and refresh
#[derive(Debug, Serialize)]
pub struct AuthToken {
    pub access_token: String,
    pub token_type: String,
}

type AccountRow = (Uuid, String, String, Option<String>, bool, DateTime<Utc>);

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(db: PgPool, config: &Config) -> Self {
        Self {
            db,
            jwt_secret: config.jwt.secret.clone(),
            access_token_expiry: config.jwt.access_token_expiry,
        }
    }

    /// Register a new account
    pub async fn register(&self, input: RegisterInput) -> AppResult<User> {
        input.validate()?;

        // Check if the email is already registered
        let existing =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE email = $1")
                .bind(&input.email)
                .fetch_one(&self.db)
                .await?;

        if existing > 0 {
            return Err(AppError::DuplicateEntry("email".to_string()));
        }

        // Hash password
        let password_hash = hash(&input.password, DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

        let row = sqlx::query_as::<_, (Uuid, String, Option<String>, bool, DateTime<Utc>)>(
            r#"
            INSERT INTO users (email, password_hash, full_name)
            VALUES ($1, $2, $3)
            RETURNING id, email, full_name, is_active, created_at
            "#,
        )
        .bind(&input.email)
        .bind(&password_hash)
        .bind(&input.full_name)
        .fetch_one(&self.db)
        .await?;

        Ok(User {
            id: row.0,
            email: row.1,
            full_name: row.2,
            is_active: row.3,
            created_at: row.4,
        })
    }

    /// Authenticate with email and password
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthToken> {
        let account = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, email, password_hash, full_name, is_active, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

        // Verify password
        let valid = verify(password, &account.2)
            .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))?;

        if !valid {
            return Err(AppError::InvalidCredentials);
        }

        // Check if the account is active
        if !account.4 {
            return Err(AppError::Unauthorized {
                message: "Account is inactive".to_string(),
            });
        }

        self.issue_token(account.0)
    }

    /// Issue a fresh token for an already-authenticated user
    pub async fn refresh(&self, user_id: Uuid) -> AppResult<AuthToken> {
        let is_active =
            sqlx::query_scalar::<_, bool>("SELECT is_active FROM users WHERE id = $1")
                .bind(user_id)
                .fetch_optional(&self.db)
                .await?
                .ok_or_else(|| AppError::NotFound("User".to_string()))?;

        if !is_active {
            return Err(AppError::Unauthorized {
                message: "Account is inactive".to_string(),
            });
        }

        self.issue_token(user_id)
    }

    /// Generate a signed access token
    fn issue_token(&self, user_id: Uuid) -> AppResult<AuthToken> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            exp: (now + Duration::seconds(self.access_token_expiry)).timestamp(),
            iat: now.timestamp(),
        };

        let access_token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))?;

        Ok(AuthToken {
            access_token,
            token_type: "bearer".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(email: &str, password: &str) -> RegisterInput {
        RegisterInput {
            email: email.to_string(),
            password: password.to_string(),
            full_name: None,
        }
    }

    #[test]
    fn test_register_input_accepts_valid_email() {
        assert!(input("user@example.com", "hunter2").validate().is_ok());
    }

    #[test]
    fn test_register_input_rejects_bad_email() {
        assert!(input("not-an-email", "hunter2").validate().is_err());
    }

    #[test]
    fn test_register_input_rejects_oversized_password() {
        assert!(input("user@example.com", &"a".repeat(73)).validate().is_err());
        assert!(input("user@example.com", &"a".repeat(72)).validate().is_ok());
    }
}
