//! Bulk import handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::middleware::CurrentUser;
use crate::models::BulkImportRequest;
use crate::services::ImportService;
use crate::AppState;

/// Import a batch of materials and denormalized product lines
pub async fn bulk_import(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(request): Json<BulkImportRequest>,
) -> impl IntoResponse {
    let service = ImportService::new(state.db.clone());

    match service.bulk_import(current_user.0.user_id, request).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => e.into_response(),
    }
}
