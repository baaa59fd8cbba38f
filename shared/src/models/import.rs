//! Bulk import request and result shapes

use serde::{Deserialize, Serialize};

use super::NewMaterial;

/// One denormalized spreadsheet-style product line. Lines sharing a
/// product name form one product; the group's first line supplies the
/// batch parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportProductLine {
    pub product_name: String,
    pub batch_output_quantity: f64,
    pub packaging_cost_per_unit: f64,
    pub margin_percentage: f64,
    pub material_name: String,
    pub quantity_used: f64,
}

/// A bulk import batch. Either section may be empty or absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BulkImportRequest {
    #[serde(default)]
    pub materials: Vec<NewMaterial>,
    #[serde(default)]
    pub product_lines: Vec<ImportProductLine>,
}

/// One failed product line.
///
/// `row` is the line's offset within its product group plus the group's
/// offset among all groups, not a position in the raw input. Non-adjacent
/// lines of the same product collapse into one group, so the two schemes
/// diverge as soon as groups interleave.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportRowError {
    pub row: usize,
    pub field: String,
    pub message: String,
}

/// Outcome counters for an import batch
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportResult {
    pub materials_added: u32,
    pub materials_duplicated: u32,
    pub products_added: u32,
    pub products_skipped: u32,
    pub errors: Vec<ImportRowError>,
}
