//! Product costing service
//!
//! Stores products with their frozen costing results, recipe entries,
//! and material snapshots. Results are persisted exactly as supplied;
//! recomputation happens in the shared costing engine, client-side for
//! direct creation and server-side for bulk import.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{
    CostingResult, MaterialSnapshot, MaterialSnapshotInput, NewProduct, ProductDetail,
    ProductEntry, ProductEntryInput, ProductSummary,
};

/// Product service for managing costed products
#[derive(Clone)]
pub struct ProductService {
    db: PgPool,
}

/// Partial update for a product. A provided entry or snapshot list
/// replaces the stored collection wholesale.
#[derive(Debug, Deserialize)]
pub struct UpdateProductInput {
    pub product_name: Option<String>,
    pub entries: Option<Vec<ProductEntryInput>>,
    pub batch_output_quantity: Option<f64>,
    pub packaging_cost_per_unit: Option<f64>,
    pub margin_percentage: Option<f64>,
    pub result: Option<CostingResult>,
    pub material_snapshots: Option<Vec<MaterialSnapshotInput>>,
}

type ProductRow = (
    Uuid,
    String,
    f64,
    f64,
    f64,
    f64,
    f64,
    f64,
    f64,
    DateTime<Utc>,
    DateTime<Utc>,
);

impl ProductService {
    /// Create a new ProductService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get all product summaries for a user, most recently updated first,
    /// optionally filtered by a case-insensitive name substring
    pub async fn get_products(
        &self,
        user_id: Uuid,
        search: Option<&str>,
    ) -> AppResult<Vec<ProductSummary>> {
        type SummaryRow = (Uuid, String, f64, f64, DateTime<Utc>, DateTime<Utc>);

        let rows = match search {
            Some(term) if !term.is_empty() => {
                sqlx::query_as::<_, SummaryRow>(
                    r#"
                    SELECT id, product_name, selling_price, final_cost_per_unit, created_at, updated_at
                    FROM products
                    WHERE user_id = $1 AND product_name ILIKE $2
                    ORDER BY updated_at DESC
                    "#,
                )
                .bind(user_id)
                .bind(format!("%{}%", term))
                .fetch_all(&self.db)
                .await?
            }
            _ => {
                sqlx::query_as::<_, SummaryRow>(
                    r#"
                    SELECT id, product_name, selling_price, final_cost_per_unit, created_at, updated_at
                    FROM products
                    WHERE user_id = $1
                    ORDER BY updated_at DESC
                    "#,
                )
                .bind(user_id)
                .fetch_all(&self.db)
                .await?
            }
        };

        Ok(rows
            .into_iter()
            .map(|r| ProductSummary {
                id: r.0,
                product_name: r.1,
                selling_price: r.2,
                final_cost_per_unit: r.3,
                created_at: r.4,
                updated_at: r.5,
            })
            .collect())
    }

    /// Get a product with its recipe entries and material snapshots
    pub async fn get_product(&self, user_id: Uuid, product_id: Uuid) -> AppResult<ProductDetail> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, product_name, batch_output_quantity, packaging_cost_per_unit,
                   margin_percentage, total_material_cost, cost_per_unit,
                   final_cost_per_unit, selling_price, created_at, updated_at
            FROM products
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(product_id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        self.load_detail(row).await
    }

    /// Assemble the full product view from its row and collections
    async fn load_detail(&self, row: ProductRow) -> AppResult<ProductDetail> {
        let product_id = row.0;

        let entries = sqlx::query_as::<_, (Uuid, Uuid, Option<Uuid>, String)>(
            r#"
            SELECT id, product_id, material_id, quantity_str
            FROM product_entries
            WHERE product_id = $1
            ORDER BY position ASC
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.db)
        .await?;

        let snapshots = sqlx::query_as::<_, (Uuid, Uuid, Option<Uuid>, String, String, f64, f64, f64, f64, f64)>(
            r#"
            SELECT id, product_id, material_id, name, unit, price_amount, price_quantity,
                   market_price_per_unit, quantity_used, line_cost
            FROM material_snapshots
            WHERE product_id = $1
            ORDER BY position ASC
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.db)
        .await?;

        Ok(ProductDetail {
            id: row.0,
            product_name: row.1,
            entries: entries
                .into_iter()
                .map(|e| ProductEntry {
                    id: e.0,
                    product_id: e.1,
                    material_id: e.2,
                    quantity_str: e.3,
                })
                .collect(),
            batch_output_quantity: row.2,
            packaging_cost_per_unit: row.3,
            margin_percentage: row.4,
            result: CostingResult {
                total_material_cost: row.5,
                cost_per_unit: row.6,
                final_cost_per_unit: row.7,
                selling_price: row.8,
            },
            material_snapshots: snapshots
                .into_iter()
                .map(|s| MaterialSnapshot {
                    id: s.0,
                    product_id: s.1,
                    material_id: s.2,
                    name: s.3,
                    unit: s.4,
                    price_amount: s.5,
                    price_quantity: s.6,
                    market_price_per_unit: s.7,
                    quantity_used: s.8,
                    line_cost: s.9,
                })
                .collect(),
            created_at: row.9,
            updated_at: row.10,
        })
    }

    /// Create a product from a complete payload
    pub async fn create_product(&self, user_id: Uuid, input: NewProduct) -> AppResult<ProductDetail> {
        let mut tx = self.db.begin().await?;
        let product_id = Self::insert_product(&mut tx, user_id, &input).await?;
        tx.commit().await?;

        self.get_product(user_id, product_id).await
    }

    /// Insert a complete product payload inside an existing transaction.
    /// Shared by direct creation and the bulk import path.
    pub(crate) async fn insert_product(
        tx: &mut Transaction<'_, Postgres>,
        user_id: Uuid,
        input: &NewProduct,
    ) -> AppResult<Uuid> {
        let product_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO products (user_id, product_name, batch_output_quantity,
                                  packaging_cost_per_unit, margin_percentage,
                                  total_material_cost, cost_per_unit,
                                  final_cost_per_unit, selling_price)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(&input.product_name)
        .bind(input.batch_output_quantity)
        .bind(input.packaging_cost_per_unit)
        .bind(input.margin_percentage)
        .bind(input.result.total_material_cost)
        .bind(input.result.cost_per_unit)
        .bind(input.result.final_cost_per_unit)
        .bind(input.result.selling_price)
        .fetch_one(&mut **tx)
        .await?;

        Self::insert_entries(tx, product_id, &input.entries).await?;
        Self::insert_snapshots(tx, product_id, &input.material_snapshots).await?;

        Ok(product_id)
    }

    /// Update a product. Collections are replaced wholesale when provided;
    /// `updated_at` always advances.
    pub async fn update_product(
        &self,
        user_id: Uuid,
        product_id: Uuid,
        input: UpdateProductInput,
    ) -> AppResult<ProductDetail> {
        let existing = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, product_name, batch_output_quantity, packaging_cost_per_unit,
                   margin_percentage, total_material_cost, cost_per_unit,
                   final_cost_per_unit, selling_price, created_at, updated_at
            FROM products
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(product_id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        let product_name = input.product_name.unwrap_or(existing.1);
        let batch_output_quantity = input.batch_output_quantity.unwrap_or(existing.2);
        let packaging_cost_per_unit = input.packaging_cost_per_unit.unwrap_or(existing.3);
        let margin_percentage = input.margin_percentage.unwrap_or(existing.4);
        let result = input.result.unwrap_or(CostingResult {
            total_material_cost: existing.5,
            cost_per_unit: existing.6,
            final_cost_per_unit: existing.7,
            selling_price: existing.8,
        });

        let mut tx = self.db.begin().await?;

        sqlx::query(
            r#"
            UPDATE products
            SET product_name = $1, batch_output_quantity = $2, packaging_cost_per_unit = $3,
                margin_percentage = $4, total_material_cost = $5, cost_per_unit = $6,
                final_cost_per_unit = $7, selling_price = $8, updated_at = NOW()
            WHERE id = $9
            "#,
        )
        .bind(&product_name)
        .bind(batch_output_quantity)
        .bind(packaging_cost_per_unit)
        .bind(margin_percentage)
        .bind(result.total_material_cost)
        .bind(result.cost_per_unit)
        .bind(result.final_cost_per_unit)
        .bind(result.selling_price)
        .bind(product_id)
        .execute(&mut *tx)
        .await?;

        if let Some(entries) = &input.entries {
            sqlx::query("DELETE FROM product_entries WHERE product_id = $1")
                .bind(product_id)
                .execute(&mut *tx)
                .await?;
            Self::insert_entries(&mut tx, product_id, entries).await?;
        }

        if let Some(snapshots) = &input.material_snapshots {
            sqlx::query("DELETE FROM material_snapshots WHERE product_id = $1")
                .bind(product_id)
                .execute(&mut *tx)
                .await?;
            Self::insert_snapshots(&mut tx, product_id, snapshots).await?;
        }

        tx.commit().await?;

        self.get_product(user_id, product_id).await
    }

    /// Delete a single product and its collections
    pub async fn delete_product(&self, user_id: Uuid, product_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1 AND user_id = $2")
            .bind(product_id)
            .bind(user_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Product".to_string()));
        }

        Ok(())
    }

    /// Delete several products, ignoring ids that do not exist.
    /// An empty id list clears the user's entire product list.
    pub async fn delete_products(&self, user_id: Uuid, ids: &[Uuid]) -> AppResult<()> {
        if ids.is_empty() {
            sqlx::query("DELETE FROM products WHERE user_id = $1")
                .bind(user_id)
                .execute(&self.db)
                .await?;
        } else {
            sqlx::query("DELETE FROM products WHERE user_id = $1 AND id = ANY($2)")
                .bind(user_id)
                .bind(ids)
                .execute(&self.db)
                .await?;
        }

        Ok(())
    }

    async fn insert_entries(
        tx: &mut Transaction<'_, Postgres>,
        product_id: Uuid,
        entries: &[ProductEntryInput],
    ) -> AppResult<()> {
        for (position, entry) in entries.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO product_entries (product_id, material_id, quantity_str, position)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(product_id)
            .bind(entry.material_id)
            .bind(&entry.quantity_str)
            .bind(position as i32)
            .execute(&mut **tx)
            .await?;
        }

        Ok(())
    }

    async fn insert_snapshots(
        tx: &mut Transaction<'_, Postgres>,
        product_id: Uuid,
        snapshots: &[MaterialSnapshotInput],
    ) -> AppResult<()> {
        for (position, snapshot) in snapshots.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO material_snapshots (product_id, material_id, name, unit,
                                                price_amount, price_quantity,
                                                market_price_per_unit, quantity_used,
                                                line_cost, position)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                "#,
            )
            .bind(product_id)
            .bind(snapshot.material_id)
            .bind(&snapshot.name)
            .bind(&snapshot.unit)
            .bind(snapshot.price_amount)
            .bind(snapshot.price_quantity)
            .bind(snapshot.market_price_per_unit)
            .bind(snapshot.quantity_used)
            .bind(snapshot.line_cost)
            .bind(position as i32)
            .execute(&mut **tx)
            .await?;
        }

        Ok(())
    }
}
