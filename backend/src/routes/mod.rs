//! Route definitions for the Product Pricing Planner

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Auth routes (public, plus protected token refresh)
        .nest("/auth", auth_routes())
        // Protected routes - current user
        .nest("/users", user_routes())
        // Protected routes - material registry
        .nest("/materials", material_routes())
        // Protected routes - product costing
        .nest("/products", product_routes())
        // Protected routes - bulk import
        .nest("/import", import_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        // Token refresh (protected endpoint)
        .merge(
            Router::new()
                .route("/refresh", get(handlers::refresh))
                .route_layer(middleware::from_fn(auth_middleware)),
        )
}

/// Current-user routes (protected)
fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/me",
            get(handlers::get_me)
                .put(handlers::update_me)
                .delete(handlers::delete_me),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Material registry routes (protected)
fn material_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_materials)
                .post(handlers::create_material)
                .delete(handlers::delete_materials),
        )
        .route(
            "/:material_id",
            put(handlers::update_material).delete(handlers::delete_material),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Product costing routes (protected)
fn product_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_products)
                .post(handlers::create_product)
                .delete(handlers::delete_products),
        )
        .route(
            "/:product_id",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Bulk import routes (protected)
fn import_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::bulk_import))
        .route_layer(middleware::from_fn(auth_middleware))
}
