//! Bulk import service
//!
//! Reconciles a spreadsheet-style batch of materials and denormalized
//! product lines against a user's registry in one transaction. The pure
//! screening and grouping passes live in the shared crate; this service
//! seeds them from the store and persists what they produce.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{BulkImportRequest, ImportResult};
use crate::services::ProductService;
use shared::costing::{self, MaterialFacts};
use shared::import::{build_products, screen_materials, MaterialIndex};

/// Import service for bulk material and product ingestion
#[derive(Clone)]
pub struct ImportService {
    db: PgPool,
}

impl ImportService {
    /// Create a new ImportService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Run a bulk import batch as a single atomic unit.
    ///
    /// Materials are screened against the user's registry, accepted rows
    /// are persisted so product lines can reference them by id, and every
    /// resolvable product group becomes one product. Row-level failures
    /// are reported in the result without failing the batch; any store
    /// failure rolls the whole batch back.
    pub async fn bulk_import(
        &self,
        user_id: Uuid,
        request: BulkImportRequest,
    ) -> AppResult<ImportResult> {
        let mut tx = self.db.begin().await?;

        // Seed the name index with the user's existing registry
        let existing = sqlx::query_as::<_, (Uuid, String, String, f64, f64)>(
            r#"
            SELECT id, name, unit, price_amount, price_quantity
            FROM materials
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&mut *tx)
        .await?;

        let mut index = MaterialIndex::from_facts(existing.into_iter().map(
            |(id, name, unit, price_amount, price_quantity)| MaterialFacts {
                id: Some(id),
                name,
                unit,
                price_amount,
                price_quantity,
            },
        ));

        // Screen and persist new materials
        let screen = screen_materials(&mut index, &request.materials);

        for row in &screen.accepted {
            let market_price = costing::unit_price(row.price_amount, row.price_quantity);
            let id = sqlx::query_scalar::<_, Uuid>(
                r#"
                INSERT INTO materials (user_id, name, unit, price_amount, price_quantity, market_price_per_unit)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING id
                "#,
            )
            .bind(user_id)
            .bind(&row.name)
            .bind(&row.unit)
            .bind(row.price_amount)
            .bind(row.price_quantity)
            .bind(market_price)
            .fetch_one(&mut *tx)
            .await?;

            index.set_id(&row.name, id);
        }

        // Group, resolve, and cost product lines
        let build = build_products(&index, &request.product_lines);

        for product in &build.products {
            ProductService::insert_product(&mut tx, user_id, product).await?;
        }

        tx.commit().await?;

        let result = ImportResult {
            materials_added: screen.accepted.len() as u32,
            materials_duplicated: screen.duplicated,
            products_added: build.products.len() as u32,
            products_skipped: build.skipped,
            errors: build.errors,
        };

        tracing::info!(
            "Bulk import for user {}: {} materials added, {} duplicated, {} products added, {} skipped, {} errors",
            user_id,
            result.materials_added,
            result.materials_duplicated,
            result.products_added,
            result.products_skipped,
            result.errors.len()
        );

        Ok(result)
    }
}
