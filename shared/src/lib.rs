//! Shared types and logic for the Product Pricing Planner
//!
//! This crate contains the domain models, the costing engine, and the
//! bulk import reconciliation passes shared between the backend, the
//! frontend (via WASM), and other components of the system.

pub mod costing;
pub mod import;
pub mod models;
pub mod validation;

pub use models::*;
pub use validation::*;
