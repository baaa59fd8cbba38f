//! Database models for the Product Pricing Planner
//!
//! Re-exports models from the shared crate and adds backend-specific models

pub use shared::models::*;
