//! WebAssembly module for the Product Pricing Planner
//!
//! Provides client-side computation for:
//! - Market price derivation
//! - Cost breakdowns
//! - Building complete product payloads for the API
//! - Dry-run previews of bulk imports

use wasm_bindgen::prelude::*;

use shared::costing::{self, MaterialFacts};
use shared::import::{build_products, screen_materials, MaterialIndex};

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Derive the market price per unit from a purchase amount and quantity
#[wasm_bindgen]
pub fn derive_unit_price(price_amount: f64, price_quantity: f64) -> f64 {
    costing::unit_price(price_amount, price_quantity)
}

/// Compute the cost breakdown for a product, returned as a JSON string
#[wasm_bindgen]
pub fn cost_breakdown(
    total_material_cost: f64,
    batch_output_quantity: f64,
    packaging_cost_per_unit: f64,
    margin_percentage: f64,
) -> Result<String, JsValue> {
    let result = costing::cost_breakdown(
        total_material_cost,
        batch_output_quantity,
        packaging_cost_per_unit,
        margin_percentage,
    );

    serde_json::to_string(&result)
        .map_err(|e| JsValue::from_str(&format!("Serialization failed: {}", e)))
}

/// One line of a product build request: a material and the quantity consumed
#[derive(serde::Deserialize)]
struct BuildLine {
    material: Material,
    quantity_used: f64,
}

/// Request for building a complete product payload
#[derive(serde::Deserialize)]
struct BuildProductRequest {
    product_name: String,
    batch_output_quantity: f64,
    packaging_cost_per_unit: f64,
    margin_percentage: f64,
    lines: Vec<BuildLine>,
}

/// Build a complete product payload (entries, frozen result, snapshots)
/// from materials and quantities, returned as a JSON string ready to POST
#[wasm_bindgen]
pub fn build_product_payload(request_json: &str) -> Result<String, JsValue> {
    let request: BuildProductRequest = serde_json::from_str(request_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid request JSON: {}", e)))?;

    let lines: Vec<(MaterialFacts, f64)> = request
        .lines
        .iter()
        .map(|line| (line.material.facts(), line.quantity_used))
        .collect();

    let payload = costing::cost_product(
        &request.product_name,
        request.batch_output_quantity,
        request.packaging_cost_per_unit,
        request.margin_percentage,
        &lines,
    );

    serde_json::to_string(&payload)
        .map_err(|e| JsValue::from_str(&format!("Serialization failed: {}", e)))
}

/// Preview the outcome of a bulk import batch without persisting anything.
/// `materials_json` is the caller's current material list as returned by
/// the API; `request_json` is the import request body.
#[wasm_bindgen]
pub fn preview_import(materials_json: &str, request_json: &str) -> Result<String, JsValue> {
    let existing: Vec<Material> = serde_json::from_str(materials_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid materials JSON: {}", e)))?;
    let request: BulkImportRequest = serde_json::from_str(request_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid request JSON: {}", e)))?;

    let mut index = MaterialIndex::from_facts(existing.iter().map(Material::facts));
    let screen = screen_materials(&mut index, &request.materials);
    let build = build_products(&index, &request.product_lines);

    let result = ImportResult {
        materials_added: screen.accepted.len() as u32,
        materials_duplicated: screen.duplicated,
        products_added: build.products.len() as u32,
        products_skipped: build.skipped,
        errors: build.errors,
    };

    serde_json::to_string(&result)
        .map_err(|e| JsValue::from_str(&format!("Serialization failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_unit_price() {
        assert_eq!(derive_unit_price(80.0, 2.0), 40.0);
        assert_eq!(derive_unit_price(80.0, 0.0), 0.0);
    }

    #[test]
    fn test_cost_breakdown_json() {
        let json = cost_breakdown(90.0, 10.0, 3.0, 40.0).unwrap();
        let result: shared::models::CostingResult = serde_json::from_str(&json).unwrap();

        assert_eq!(result.cost_per_unit, 9.0);
        assert_eq!(result.final_cost_per_unit, 12.0);
        assert!((result.selling_price - 16.8).abs() < 1e-9);
    }

    #[test]
    fn test_build_product_payload() {
        let request = r#"{
            "product_name": "Croissant",
            "batch_output_quantity": 10.0,
            "packaging_cost_per_unit": 3.0,
            "margin_percentage": 40.0,
            "lines": [
                {
                    "material": {
                        "id": "00000000-0000-0000-0000-000000000001",
                        "name": "Flour",
                        "unit": "kg",
                        "price_amount": 30.0,
                        "price_quantity": 1.0,
                        "market_price_per_unit": 30.0,
                        "created_at": "2025-01-01T00:00:00Z"
                    },
                    "quantity_used": 3.0
                }
            ]
        }"#;

        let json = build_product_payload(request).unwrap();
        let payload: shared::models::NewProduct = serde_json::from_str(&json).unwrap();

        assert_eq!(payload.product_name, "Croissant");
        assert_eq!(payload.entries.len(), 1);
        assert_eq!(payload.material_snapshots[0].line_cost, 90.0);
        assert_eq!(payload.result.final_cost_per_unit, 12.0);
    }

    #[test]
    fn test_preview_import_counts_duplicates() {
        let materials = r#"[{
            "id": "00000000-0000-0000-0000-000000000001",
            "name": "Flour",
            "unit": "kg",
            "price_amount": 30.0,
            "price_quantity": 1.0,
            "market_price_per_unit": 30.0,
            "created_at": "2025-01-01T00:00:00Z"
        }]"#;
        let request = r#"{
            "materials": [
                {"name": "FLOUR", "unit": "kg", "price_amount": 35.0, "price_quantity": 1.0},
                {"name": "Butter", "unit": "kg", "price_amount": 200.0, "price_quantity": 2.0}
            ],
            "product_lines": []
        }"#;

        let json = preview_import(materials, request).unwrap();
        let result: ImportResult = serde_json::from_str(&json).unwrap();

        assert_eq!(result.materials_added, 1);
        assert_eq!(result.materials_duplicated, 1);
    }
}
