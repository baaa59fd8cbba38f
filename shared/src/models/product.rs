//! Product models: recipes, frozen costing results, and material snapshots

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Frozen output of a costing run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostingResult {
    pub total_material_cost: f64,
    pub cost_per_unit: f64,
    pub final_cost_per_unit: f64,
    pub selling_price: f64,
}

/// One recipe line as supplied by the caller.
/// The quantity keeps its text form so clients can round-trip what
/// the user typed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductEntryInput {
    pub material_id: Option<Uuid>,
    pub quantity_str: String,
}

/// A stored recipe line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductEntry {
    pub id: Uuid,
    pub product_id: Uuid,
    pub material_id: Option<Uuid>,
    pub quantity_str: String,
}

/// Material pricing captured at costing time, as supplied by the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialSnapshotInput {
    pub material_id: Option<Uuid>,
    pub name: String,
    pub unit: String,
    pub price_amount: f64,
    pub price_quantity: f64,
    pub market_price_per_unit: f64,
    pub quantity_used: f64,
    pub line_cost: f64,
}

/// A stored material snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialSnapshot {
    pub id: Uuid,
    pub product_id: Uuid,
    pub material_id: Option<Uuid>,
    pub name: String,
    pub unit: String,
    pub price_amount: f64,
    pub price_quantity: f64,
    pub market_price_per_unit: f64,
    pub quantity_used: f64,
    pub line_cost: f64,
}

/// A complete product payload: recipe, batch parameters, frozen result,
/// and the snapshots backing it. Interactive clients build this with the
/// shared costing engine before submitting; the bulk import path builds
/// it server-side from resolved lines. Both persist identically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub product_name: String,
    pub entries: Vec<ProductEntryInput>,
    pub batch_output_quantity: f64,
    pub packaging_cost_per_unit: f64,
    pub margin_percentage: f64,
    pub result: CostingResult,
    pub material_snapshots: Vec<MaterialSnapshotInput>,
}

/// Product list item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: Uuid,
    pub product_name: String,
    pub selling_price: f64,
    pub final_cost_per_unit: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full product view with recipe and snapshots
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDetail {
    pub id: Uuid,
    pub product_name: String,
    pub entries: Vec<ProductEntry>,
    pub batch_output_quantity: f64,
    pub packaging_cost_per_unit: f64,
    pub margin_percentage: f64,
    pub result: CostingResult,
    pub material_snapshots: Vec<MaterialSnapshot>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
