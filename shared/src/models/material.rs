//! Material models for the per-user raw material registry

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::costing::{self, MaterialFacts};

/// A raw material with its derived market price
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    pub id: Uuid,
    pub name: String,
    pub unit: String,
    pub price_amount: f64,
    pub price_quantity: f64,
    pub market_price_per_unit: f64,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a material; also the shape of one import material row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMaterial {
    pub name: String,
    pub unit: String,
    pub price_amount: f64,
    pub price_quantity: f64,
}

/// Partial update for a material
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateMaterial {
    pub name: Option<String>,
    pub unit: Option<String>,
    pub price_amount: Option<f64>,
    pub price_quantity: Option<f64>,
}

impl Material {
    /// Apply a partial update. The market price is rederived from the
    /// post-update purchase pair regardless of which fields changed.
    pub fn apply_update(&mut self, changes: UpdateMaterial) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(unit) = changes.unit {
            self.unit = unit;
        }
        if let Some(amount) = changes.price_amount {
            self.price_amount = amount;
        }
        if let Some(quantity) = changes.price_quantity {
            self.price_quantity = quantity;
        }
        self.market_price_per_unit = costing::unit_price(self.price_amount, self.price_quantity);
    }

    /// Pricing facts consumed by the costing engine
    pub fn facts(&self) -> MaterialFacts {
        MaterialFacts {
            id: Some(self.id),
            name: self.name.clone(),
            unit: self.unit.clone(),
            price_amount: self.price_amount,
            price_quantity: self.price_quantity,
        }
    }
}

impl NewMaterial {
    /// Pricing facts for a material that has no stored identity yet
    pub fn facts(&self) -> MaterialFacts {
        MaterialFacts {
            id: None,
            name: self.name.clone(),
            unit: self.unit.clone(),
            price_amount: self.price_amount,
            price_quantity: self.price_quantity,
        }
    }
}
