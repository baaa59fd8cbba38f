//! Material registry service
//!
//! Owns the per-user raw material registry. The market price per unit is
//! derived from the purchase pair on every write, never taken from the
//! caller.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Material, NewMaterial, UpdateMaterial};
use shared::costing;

/// Material service for managing a user's raw material registry
#[derive(Clone)]
pub struct MaterialService {
    db: PgPool,
}

type MaterialRow = (Uuid, String, String, f64, f64, f64, DateTime<Utc>);

fn material_from_row(row: MaterialRow) -> Material {
    Material {
        id: row.0,
        name: row.1,
        unit: row.2,
        price_amount: row.3,
        price_quantity: row.4,
        market_price_per_unit: row.5,
        created_at: row.6,
    }
}

impl MaterialService {
    /// Create a new MaterialService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get all materials for a user, newest first, optionally filtered
    /// by a case-insensitive name substring
    pub async fn get_materials(
        &self,
        user_id: Uuid,
        search: Option<&str>,
    ) -> AppResult<Vec<Material>> {
        let rows = match search {
            Some(term) if !term.is_empty() => {
                sqlx::query_as::<_, MaterialRow>(
                    r#"
                    SELECT id, name, unit, price_amount, price_quantity, market_price_per_unit, created_at
                    FROM materials
                    WHERE user_id = $1 AND name ILIKE $2
                    ORDER BY created_at DESC
                    "#,
                )
                .bind(user_id)
                .bind(format!("%{}%", term))
                .fetch_all(&self.db)
                .await?
            }
            _ => {
                sqlx::query_as::<_, MaterialRow>(
                    r#"
                    SELECT id, name, unit, price_amount, price_quantity, market_price_per_unit, created_at
                    FROM materials
                    WHERE user_id = $1
                    ORDER BY created_at DESC
                    "#,
                )
                .bind(user_id)
                .fetch_all(&self.db)
                .await?
            }
        };

        Ok(rows.into_iter().map(material_from_row).collect())
    }

    /// Create a material. The market price is derived at insert time.
    pub async fn create_material(&self, user_id: Uuid, input: NewMaterial) -> AppResult<Material> {
        let market_price = costing::unit_price(input.price_amount, input.price_quantity);

        let row = sqlx::query_as::<_, MaterialRow>(
            r#"
            INSERT INTO materials (user_id, name, unit, price_amount, price_quantity, market_price_per_unit)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, unit, price_amount, price_quantity, market_price_per_unit, created_at
            "#,
        )
        .bind(user_id)
        .bind(&input.name)
        .bind(&input.unit)
        .bind(input.price_amount)
        .bind(input.price_quantity)
        .bind(market_price)
        .fetch_one(&self.db)
        .await?;

        Ok(material_from_row(row))
    }

    /// Update a material. The market price is rederived from the
    /// post-update purchase pair regardless of which fields changed.
    pub async fn update_material(
        &self,
        user_id: Uuid,
        material_id: Uuid,
        input: UpdateMaterial,
    ) -> AppResult<Material> {
        let row = sqlx::query_as::<_, MaterialRow>(
            r#"
            SELECT id, name, unit, price_amount, price_quantity, market_price_per_unit, created_at
            FROM materials
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(material_id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Material".to_string()))?;

        let mut material = material_from_row(row);
        material.apply_update(input);

        sqlx::query(
            r#"
            UPDATE materials
            SET name = $1, unit = $2, price_amount = $3, price_quantity = $4, market_price_per_unit = $5
            WHERE id = $6
            "#,
        )
        .bind(&material.name)
        .bind(&material.unit)
        .bind(material.price_amount)
        .bind(material.price_quantity)
        .bind(material.market_price_per_unit)
        .bind(material_id)
        .execute(&self.db)
        .await?;

        Ok(material)
    }

    /// Delete a single material
    pub async fn delete_material(&self, user_id: Uuid, material_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM materials WHERE id = $1 AND user_id = $2")
            .bind(material_id)
            .bind(user_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Material".to_string()));
        }

        Ok(())
    }

    /// Delete several materials, ignoring ids that do not exist.
    /// An empty id list clears the user's entire registry.
    pub async fn delete_materials(&self, user_id: Uuid, ids: &[Uuid]) -> AppResult<()> {
        if ids.is_empty() {
            sqlx::query("DELETE FROM materials WHERE user_id = $1")
                .bind(user_id)
                .execute(&self.db)
                .await?;
        } else {
            sqlx::query("DELETE FROM materials WHERE user_id = $1 AND id = ANY($2)")
                .bind(user_id)
                .bind(ids)
                .execute(&self.db)
                .await?;
        }

        Ok(())
    }
}
