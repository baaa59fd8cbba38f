//! User self-management service

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::User;

/// User service for the authenticated account
#[derive(Clone)]
pub struct UserService {
    db: PgPool,
}

/// Partial update for the current user's profile
#[derive(Debug, Deserialize)]
pub struct UpdateUserInput {
    pub full_name: Option<String>,
}

type UserRow = (Uuid, String, Option<String>, bool, DateTime<Utc>);

fn user_from_row(row: UserRow) -> User {
    User {
        id: row.0,
        email: row.1,
        full_name: row.2,
        is_active: row.3,
        created_at: row.4,
    }
}

impl UserService {
    /// Create a new UserService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get the current user's account record
    pub async fn get_user(&self, user_id: Uuid) -> AppResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, full_name, is_active, created_at FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("User".to_string()))?;

        Ok(user_from_row(row))
    }

    /// Update the current user's profile
    pub async fn update_user(&self, user_id: Uuid, input: UpdateUserInput) -> AppResult<User> {
        let existing = self.get_user(user_id).await?;
        let full_name = input.full_name.or(existing.full_name);

        sqlx::query("UPDATE users SET full_name = $1 WHERE id = $2")
            .bind(&full_name)
            .bind(user_id)
            .execute(&self.db)
            .await?;

        self.get_user(user_id).await
    }

    /// Delete the current user's account. Materials and products owned
    /// by the account go with it.
    pub async fn delete_user(&self, user_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("User".to_string()));
        }

        Ok(())
    }
}
