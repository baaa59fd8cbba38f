//! Product costing tests
//!
//! Tests for the costing engine:
//! - Property 1: Market price is the purchase amount over the purchase quantity
//! - Property 2: Zero quantities never divide; they yield zero
//! - Property 3: Total material cost is the sum of line costs
//! - Property 4: Selling price scales linearly with margin
//! - Property 5: Snapshots freeze pricing independent of later changes

use proptest::prelude::*;
use shared::costing::{cost_breakdown, cost_product, unit_price, MaterialFacts};

/// Helper to build pricing facts for a material
fn facts(name: &str, amount: f64, quantity: f64) -> MaterialFacts {
    MaterialFacts {
        id: None,
        name: name.to_string(),
        unit: "kg".to_string(),
        price_amount: amount,
        price_quantity: quantity,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_unit_price_exact_division() {
        assert_eq!(unit_price(80.0, 2.0), 40.0);
        assert_eq!(unit_price(50.0, 1.0), 50.0);
        assert_eq!(unit_price(100.0, 3.0), 100.0 / 3.0);
    }

    #[test]
    fn test_unit_price_zero_quantity() {
        assert_eq!(unit_price(80.0, 0.0), 0.0);
        assert_eq!(unit_price(0.0, 0.0), 0.0);
    }

    /// 3 units of flour at market price 30 into a batch of 10, packaging 3,
    /// margin 40%
    #[test]
    fn test_breakdown_flour_example() {
        let result = cost_breakdown(90.0, 10.0, 3.0, 40.0);

        assert_eq!(result.total_material_cost, 90.0);
        assert_eq!(result.cost_per_unit, 9.0);
        assert_eq!(result.final_cost_per_unit, 12.0);
        assert!((result.selling_price - 16.8).abs() < 1e-9);
    }

    #[test]
    fn test_breakdown_zero_batch_output() {
        let result = cost_breakdown(90.0, 0.0, 3.0, 40.0);

        assert_eq!(result.cost_per_unit, 0.0);
        assert_eq!(result.final_cost_per_unit, 3.0);
    }

    #[test]
    fn test_breakdown_zero_margin_sells_at_cost() {
        let result = cost_breakdown(50.0, 2.0, 0.5, 0.0);

        assert_eq!(result.final_cost_per_unit, 25.5);
        assert_eq!(result.selling_price, 25.5);
    }

    #[test]
    fn test_cost_product_builds_entries_and_snapshots() {
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
        assert_eq!(flour.quantity_used, 2.0);
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
    fn test_entries_keep_quantity_text_form() {
        let product = cost_product("Bread", 4.0, 0.0, 0.0, &[(facts("Flour", 30.0, 1.0), 2.5)]);

        assert_eq!(product.entries[0].quantity_str, "2.5");
        assert_eq!(product.entries[0].material_id, None);
    }

    #[test]
    fn test_snapshots_freeze_source_pricing() {
        let mut source = facts("Flour", 30.0, 1.0);
        let product = cost_product("Bread", 4.0, 0.0, 0.0, &[(source.clone(), 2.0)]);

        // Later changes to the source material must not reach the snapshot
        source.price_amount = 999.0;
        source.price_quantity = 3.0;

        assert_eq!(product.material_snapshots[0].price_amount, 30.0);
        assert_eq!(product.material_snapshots[0].price_quantity, 1.0);
        assert_eq!(product.material_snapshots[0].line_cost, 60.0);
    }

    #[test]
    fn test_empty_recipe_costs_nothing() {
        let product = cost_product("Air", 10.0, 2.0, 50.0, &[]);

        assert_eq!(product.result.total_material_cost, 0.0);
        assert_eq!(product.result.cost_per_unit, 0.0);
        assert_eq!(product.result.final_cost_per_unit, 2.0);
        assert_eq!(product.result.selling_price, 3.0);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for purchase amounts
    fn amount_strategy() -> impl Strategy<Value = f64> {
        (1u32..=100_000u32).prop_map(|n| n as f64 / 100.0)
    }

    /// Strategy for positive quantities
    fn quantity_strategy() -> impl Strategy<Value = f64> {
        (1u32..=10_000u32).prop_map(|n| n as f64 / 10.0)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property 1: Market price is plain division
        #[test]
        fn prop_unit_price_is_plain_division(
            amount in amount_strategy(),
            quantity in quantity_strategy()
        ) {
            prop_assert_eq!(unit_price(amount, quantity), amount / quantity);
        }

        /// Property 2: Zero purchase quantity yields a zero market price
        #[test]
        fn prop_zero_quantity_yields_zero_price(amount in amount_strategy()) {
            prop_assert_eq!(unit_price(amount, 0.0), 0.0);
        }

        /// Property 3: Total material cost equals the sum of snapshot line costs
        #[test]
        fn prop_total_is_sum_of_line_costs(
            lines in prop::collection::vec(
                (amount_strategy(), quantity_strategy(), quantity_strategy()),
                1..8
            )
        ) {
            let costed: Vec<(MaterialFacts, f64)> = lines
                .iter()
                .enumerate()
                .map(|(i, (amount, quantity, used))| {
                    (facts(&format!("m{}", i), *amount, *quantity), *used)
                })
                .collect();

            let product = cost_product("P", 1.0, 0.0, 0.0, &costed);

            let sum: f64 = product.material_snapshots.iter().map(|s| s.line_cost).sum();
            prop_assert_eq!(product.result.total_material_cost, sum);
        }

        /// One entry and one snapshot per input line
        #[test]
        fn prop_one_snapshot_per_line(
            lines in prop::collection::vec(
                (amount_strategy(), quantity_strategy(), quantity_strategy()),
                0..8
            )
        ) {
            let costed: Vec<(MaterialFacts, f64)> = lines
                .iter()
                .enumerate()
                .map(|(i, (amount, quantity, used))| {
                    (facts(&format!("m{}", i), *amount, *quantity), *used)
                })
                .collect();

            let product = cost_product("P", 1.0, 0.0, 0.0, &costed);

            prop_assert_eq!(product.entries.len(), lines.len());
            prop_assert_eq!(product.material_snapshots.len(), lines.len());
        }

        /// Property 3: Reordering lines leaves the total unchanged within
        /// float tolerance
        #[test]
        fn prop_total_is_order_independent(
            lines in prop::collection::vec(
                (amount_strategy(), quantity_strategy(), quantity_strategy()),
                1..8
            )
        ) {
            let costed: Vec<(MaterialFacts, f64)> = lines
                .iter()
                .enumerate()
                .map(|(i, (amount, quantity, used))| {
                    (facts(&format!("m{}", i), *amount, *quantity), *used)
                })
                .collect();
            let mut reversed = costed.clone();
            reversed.reverse();

            let forward = cost_product("P", 1.0, 0.0, 0.0, &costed)
                .result
                .total_material_cost;
            let backward = cost_product("P", 1.0, 0.0, 0.0, &reversed)
                .result
                .total_material_cost;

            let scale = forward.abs().max(backward.abs()).max(1.0);
            prop_assert!((forward - backward).abs() <= scale * 1e-12);
        }

        /// Property 4: Selling price is the final cost scaled by the margin
        #[test]
        fn prop_selling_price_scales_with_margin(
            total in amount_strategy(),
            batch in quantity_strategy(),
            packaging in amount_strategy(),
            margin in 0u32..=200u32
        ) {
            let result = cost_breakdown(total, batch, packaging, margin as f64);
            let expected = result.final_cost_per_unit * (1.0 + margin as f64 / 100.0);

            prop_assert_eq!(result.selling_price, expected);
        }

        /// Final cost per unit is never below the packaging cost
        #[test]
        fn prop_final_cost_at_least_packaging(
            total in amount_strategy(),
            batch in quantity_strategy(),
            packaging in amount_strategy()
        ) {
            let result = cost_breakdown(total, batch, packaging, 0.0);

            prop_assert!(result.final_cost_per_unit >= packaging);
        }
    }
}
