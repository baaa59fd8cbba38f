//! Product costing handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::Query as MultiQuery;
use serde::Deserialize;
use uuid::Uuid;

use crate::middleware::CurrentUser;
use crate::models::NewProduct;
use crate::services::product::UpdateProductInput;
use crate::services::ProductService;
use crate::AppState;

#[derive(Deserialize)]
pub struct ListProductsParams {
    pub search: Option<String>,
}

/// Bulk delete parameters, repeated as `ids=<uuid>&ids=<uuid>`
#[derive(Deserialize)]
pub struct DeleteProductsParams {
    #[serde(default)]
    pub ids: Vec<Uuid>,
}

/// List the current user's product summaries, optionally filtered by name
pub async fn list_products(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(params): Query<ListProductsParams>,
) -> impl IntoResponse {
    let service = ProductService::new(state.db.clone());

    match service
        .get_products(current_user.0.user_id, params.search.as_deref())
        .await
    {
        Ok(products) => (StatusCode::OK, Json(products)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a product from a complete costed payload
pub async fn create_product(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<NewProduct>,
) -> impl IntoResponse {
    let service = ProductService::new(state.db.clone());

    match service.create_product(current_user.0.user_id, input).await {
        Ok(product) => (StatusCode::CREATED, Json(product)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a product with its recipe and snapshots
pub async fn get_product(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(product_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = ProductService::new(state.db.clone());

    match service.get_product(current_user.0.user_id, product_id).await {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update a product
pub async fn update_product(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(product_id): Path<Uuid>,
    Json(input): Json<UpdateProductInput>,
) -> impl IntoResponse {
    let service = ProductService::new(state.db.clone());

    match service
        .update_product(current_user.0.user_id, product_id, input)
        .await
    {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a product
pub async fn delete_product(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(product_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = ProductService::new(state.db.clone());

    match service
        .delete_product(current_user.0.user_id, product_id)
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete several products, or the whole list when no ids are given
pub async fn delete_products(
    State(state): State<AppState>,
    current_user: CurrentUser,
    MultiQuery(params): MultiQuery<DeleteProductsParams>,
) -> impl IntoResponse {
    let service = ProductService::new(state.db.clone());

    match service
        .delete_products(current_user.0.user_id, &params.ids)
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
