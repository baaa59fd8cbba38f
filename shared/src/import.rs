//! Bulk import reconciliation
//!
//! The pure passes behind the import endpoint: screening material rows
//! against a user's registry and turning denormalized product lines into
//! costed product payloads. The backend persists what these passes
//! produce; the WASM module runs the same passes for dry-run previews.

use std::collections::HashMap;

use uuid::Uuid;

use crate::costing::{self, MaterialFacts};
use crate::models::{ImportProductLine, ImportRowError, NewMaterial, NewProduct};

/// Name-keyed registry of material pricing facts.
///
/// Lookup is case-insensitive; the stored facts keep the original
/// spelling. Screening adds accepted batch rows as it goes, so later
/// rows and product lines resolve against pre-existing and newly
/// accepted materials alike.
#[derive(Debug, Clone, Default)]
pub struct MaterialIndex {
    by_name: HashMap<String, MaterialFacts>,
}

impl MaterialIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from already-known materials
    pub fn from_facts<I>(facts: I) -> Self
    where
        I: IntoIterator<Item = MaterialFacts>,
    {
        let mut index = Self::new();
        for f in facts {
            index.insert(f);
        }
        index
    }

    pub fn insert(&mut self, facts: MaterialFacts) {
        self.by_name.insert(facts.name.to_lowercase(), facts);
    }

    pub fn resolve(&self, name: &str) -> Option<&MaterialFacts> {
        self.by_name.get(&name.to_lowercase())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(&name.to_lowercase())
    }

    /// Record the store-assigned id of a screened material
    pub fn set_id(&mut self, name: &str, id: Uuid) {
        if let Some(facts) = self.by_name.get_mut(&name.to_lowercase()) {
            facts.id = Some(id);
        }
    }
}

/// Outcome of screening material rows
#[derive(Debug, Clone, Default)]
pub struct MaterialScreen {
    /// Rows to persist, in input order
    pub accepted: Vec<NewMaterial>,
    pub duplicated: u32,
}

/// Screen material rows against the index.
///
/// A row whose name is already known, from the registry or from an
/// earlier row in the same batch, counts as a duplicate and leaves the
/// known facts untouched. Accepted rows join the index immediately with
/// no id yet.
pub fn screen_materials(index: &mut MaterialIndex, rows: &[NewMaterial]) -> MaterialScreen {
    let mut screen = MaterialScreen::default();

    for row in rows {
        if index.contains(&row.name) {
            screen.duplicated += 1;
            continue;
        }
        index.insert(row.facts());
        screen.accepted.push(row.clone());
    }

    screen
}

/// Outcome of building products from import lines
#[derive(Debug, Clone, Default)]
pub struct ProductBuild {
    /// Fully costed payloads for groups whose lines all resolved
    pub products: Vec<NewProduct>,
    pub skipped: u32,
    pub errors: Vec<ImportRowError>,
}

/// Group lines by product name and cost each resolvable group.
///
/// Groups keep first-occurrence order and the exact spelling of the
/// product name; material resolution is case-insensitive. Every
/// unresolved line yields one error, and a single unresolved line skips
/// its whole group. Batch output, packaging, and margin come from the
/// group's first line.
pub fn build_products(index: &MaterialIndex, lines: &[ImportProductLine]) -> ProductBuild {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<&ImportProductLine>> = HashMap::new();

    for line in lines {
        groups
            .entry(line.product_name.as_str())
            .or_insert_with(|| {
                order.push(line.product_name.as_str());
                Vec::new()
            })
            .push(line);
    }

    let mut build = ProductBuild::default();

    for (group_offset, name) in order.iter().enumerate() {
        let group = &groups[name];
        let mut resolved: Vec<(MaterialFacts, f64)> = Vec::with_capacity(group.len());
        let mut failed = false;

        for (line_offset, line) in group.iter().enumerate() {
            match index.resolve(&line.material_name) {
                Some(facts) => resolved.push((facts.clone(), line.quantity_used)),
                None => {
                    failed = true;
                    build.errors.push(ImportRowError {
                        row: group_offset + line_offset,
                        field: "material_name".to_string(),
                        message: format!("Material '{}' not found", line.material_name),
                    });
                }
            }
        }

        if failed {
            build.skipped += 1;
            continue;
        }

        let first = group[0];
        build.products.push(costing::cost_product(
            name,
            first.batch_output_quantity,
            first.packaging_cost_per_unit,
            first.margin_percentage,
            &resolved,
        ));
    }

    build
}
