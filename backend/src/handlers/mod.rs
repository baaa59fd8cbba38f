//! HTTP handlers for the Product Pricing Planner

pub mod auth;
pub mod health;
pub mod import;
pub mod material;
pub mod product;
pub mod user;

pub use auth::*;
pub use health::*;
pub use import::*;
pub use material::*;
pub use product::*;
pub use user::*;
