//! Product costing engine
//!
//! Pure pricing math shared by the backend import path and the
//! browser-side payload builder. All arithmetic is plain f64 with no
//! rounding; callers freeze the results into product records.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{CostingResult, MaterialSnapshotInput, NewProduct, ProductEntryInput};

/// Pricing facts for one material as consumed by the engine.
///
/// `id` is None for materials that have not been persisted yet, such as
/// import rows screened before the store assigns identities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialFacts {
    pub id: Option<Uuid>,
    pub name: String,
    pub unit: String,
    pub price_amount: f64,
    pub price_quantity: f64,
}

/// Derive the market price per unit from a purchase observation.
/// A zero purchase quantity yields a zero price rather than a division error.
pub fn unit_price(amount: f64, quantity: f64) -> f64 {
    if quantity == 0.0 {
        0.0
    } else {
        amount / quantity
    }
}

/// Cost of consuming `quantity_used` of a material at its market price
pub fn line_cost(market_price_per_unit: f64, quantity_used: f64) -> f64 {
    market_price_per_unit * quantity_used
}

/// Derive the per-unit and selling figures from an accumulated material cost.
/// A zero batch output yields a zero cost per unit; packaging and margin
/// still apply on top of it.
pub fn cost_breakdown(
    total_material_cost: f64,
    batch_output_quantity: f64,
    packaging_cost_per_unit: f64,
    margin_percentage: f64,
) -> CostingResult {
    let cost_per_unit = if batch_output_quantity == 0.0 {
        0.0
    } else {
        total_material_cost / batch_output_quantity
    };
    let final_cost_per_unit = cost_per_unit + packaging_cost_per_unit;
    let selling_price = final_cost_per_unit * (1.0 + margin_percentage / 100.0);

    CostingResult {
        total_material_cost,
        cost_per_unit,
        final_cost_per_unit,
        selling_price,
    }
}

/// Cost a whole product from resolved lines.
///
/// Market prices are rederived from the purchase facts, one snapshot is
/// frozen per line in input order, and each entry keeps its quantity in
/// text form.
pub fn cost_product(
    product_name: &str,
    batch_output_quantity: f64,
    packaging_cost_per_unit: f64,
    margin_percentage: f64,
    lines: &[(MaterialFacts, f64)],
) -> NewProduct {
    let mut total_material_cost = 0.0;
    let mut entries = Vec::with_capacity(lines.len());
    let mut material_snapshots = Vec::with_capacity(lines.len());

    for (facts, quantity_used) in lines {
        let market_price_per_unit = unit_price(facts.price_amount, facts.price_quantity);
        let cost = line_cost(market_price_per_unit, *quantity_used);
        total_material_cost += cost;

        entries.push(ProductEntryInput {
            material_id: facts.id,
            quantity_str: quantity_used.to_string(),
        });
        material_snapshots.push(MaterialSnapshotInput {
            material_id: facts.id,
            name: facts.name.clone(),
            unit: facts.unit.clone(),
            price_amount: facts.price_amount,
            price_quantity: facts.price_quantity,
            market_price_per_unit,
            quantity_used: *quantity_used,
            line_cost: cost,
        });
    }

    let result = cost_breakdown(
        total_material_cost,
        batch_output_quantity,
        packaging_cost_per_unit,
        margin_percentage,
    );

    NewProduct {
        product_name: product_name.to_string(),
        entries,
        batch_output_quantity,
        packaging_cost_per_unit,
        margin_percentage,
        result,
        material_snapshots,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facts(name: &str, amount: f64, quantity: f64) -> MaterialFacts {
        MaterialFacts {
            id: None,
            name: name.to_string(),
            unit: "kg".to_string(),
            price_amount: amount,
            price_quantity: quantity,
        }
    }

    #[test]
    fn unit_price_is_plain_division() {
        assert_eq!(unit_price(80.0, 2.0), 40.0);
        assert_eq!(unit_price(50.0, 1.0), 50.0);
        assert_eq!(unit_price(100.0, 3.0), 100.0 / 3.0);
    }

    #[test]
    fn unit_price_zero_quantity_yields_zero() {
        assert_eq!(unit_price(80.0, 0.0), 0.0);
        assert_eq!(unit_price(0.0, 0.0), 0.0);
    }

    #[test]
    fn breakdown_matches_hand_computation() {
        // 90 material cost over a batch of 10, packaging 3, margin 40%
        let result = cost_breakdown(90.0, 10.0, 3.0, 40.0);

        assert_eq!(result.total_material_cost, 90.0);
        assert_eq!(result.cost_per_unit, 9.0);
        assert_eq!(result.final_cost_per_unit, 12.0);
        assert!((result.selling_price - 16.8).abs() < 1e-9);
    }

    #[test]
    fn breakdown_zero_batch_output() {
        let result = cost_breakdown(90.0, 0.0, 3.0, 40.0);

        assert_eq!(result.cost_per_unit, 0.0);
        assert_eq!(result.final_cost_per_unit, 3.0);
    }

    #[test]
    fn cost_product_freezes_one_snapshot_per_line() {
        let lines = vec![
            (facts("Flour", 50.0, 1.0), 2.0),
            (facts("Sugar", 80.0, 2.0), 0.5),
        ];
        let product = cost_product("Chocolate Cake", 10.0, 5.0, 30.0, &lines);

        assert_eq!(product.entries.len(), 2);
        assert_eq!(product.material_snapshots.len(), 2);

        let flour = &product.material_snapshots[0];
        assert_eq!(flour.name, "Flour");
        assert_eq!(flour.market_price_per_unit, 50.0);
        assert_eq!(flour.line_cost, 100.0);

        let sugar = &product.material_snapshots[1];
        assert_eq!(sugar.market_price_per_unit, 40.0);
        assert_eq!(sugar.line_cost, 20.0);

        assert_eq!(product.result.total_material_cost, 120.0);
        assert_eq!(product.result.cost_per_unit, 12.0);
        assert_eq!(product.result.final_cost_per_unit, 17.0);
        assert!((product.result.selling_price - 22.1).abs() < 1e-9);
    }

    #[test]
    fn cost_product_keeps_quantity_text_form() {
        let lines = vec![(facts("Flour", 30.0, 1.0), 2.5)];
        let product = cost_product("Bread", 4.0, 0.0, 0.0, &lines);

        assert_eq!(product.entries[0].quantity_str, "2.5");
        assert_eq!(product.entries[0].material_id, None);
    }

    #[test]
    fn cost_product_snapshot_survives_source_changes() {
        let mut source = facts("Flour", 30.0, 1.0);
        let product = cost_product("Bread", 4.0, 0.0, 0.0, &[(source.clone(), 2.0)]);

        source.price_amount = 999.0;

        assert_eq!(product.material_snapshots[0].price_amount, 30.0);
        assert_eq!(product.material_snapshots[0].line_cost, 60.0);
    }
}
