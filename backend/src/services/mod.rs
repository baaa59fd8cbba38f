//! Business logic services for the Product Pricing Planner

pub mod auth;
pub mod import;
pub mod material;
pub mod product;
pub mod user;

pub use auth::AuthService;
pub use import::ImportService;
pub use material::MaterialService;
pub use product::ProductService;
pub use user::UserService;
