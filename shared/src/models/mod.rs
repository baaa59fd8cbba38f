//! Shared data models for the Product Pricing Planner

mod import;
mod material;
mod product;
mod user;

pub use import::*;
pub use material::*;
pub use product::*;
pub use user::*;
