//! Material registry handlers

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
use crate::models::{NewMaterial, UpdateMaterial};
use crate::services::MaterialService;
use crate::AppState;

#[derive(Deserialize)]
pub struct ListMaterialsParams {
    pub search: Option<String>,
}

/// Bulk delete parameters, repeated as `ids=<uuid>&ids=<uuid>`
#[derive(Deserialize)]
pub struct DeleteMaterialsParams {
    #[serde(default)]
    pub ids: Vec<Uuid>,
}

/// List the current user's materials, optionally filtered by name
pub async fn list_materials(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(params): Query<ListMaterialsParams>,
) -> impl IntoResponse {
    let service = MaterialService::new(state.db.clone());

    match service
        .get_materials(current_user.0.user_id, params.search.as_deref())
        .await
    {
        Ok(materials) => (StatusCode::OK, Json(materials)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a material
pub async fn create_material(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<NewMaterial>,
) -> impl IntoResponse {
    let service = MaterialService::new(state.db.clone());

    match service.create_material(current_user.0.user_id, input).await {
        Ok(material) => (StatusCode::CREATED, Json(material)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update a material
pub async fn update_material(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(material_id): Path<Uuid>,
    Json(input): Json<UpdateMaterial>,
) -> impl IntoResponse {
    let service = MaterialService::new(state.db.clone());

    match service
        .update_material(current_user.0.user_id, material_id, input)
        .await
    {
        Ok(material) => (StatusCode::OK, Json(material)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a material
pub async fn delete_material(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(material_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = MaterialService::new(state.db.clone());

    match service
        .delete_material(current_user.0.user_id, material_id)
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete several materials, or the whole registry when no ids are given
pub async fn delete_materials(
    State(state): State<AppState>,
    current_user: CurrentUser,
    MultiQuery(params): MultiQuery<DeleteMaterialsParams>,
) -> impl IntoResponse {
    let service = MaterialService::new(state.db.clone());

    match service
        .delete_materials(current_user.0.user_id, &params.ids)
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
