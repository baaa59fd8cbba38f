//! HTTP middleware for the Product Pricing Planner

pub mod auth;

pub use auth::{auth_middleware, CurrentUser};
