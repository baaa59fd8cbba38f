//! Current-user handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::middleware::CurrentUser;
use crate::services::user::UpdateUserInput;
use crate::services::UserService;
use crate::AppState;

/// Get the current user's account
pub async fn get_me(State(state): State<AppState>, current_user: CurrentUser) -> impl IntoResponse {
    let service = UserService::new(state.db.clone());

    match service.get_user(current_user.0.user_id).await {
        Ok(user) => (StatusCode::OK, Json(user)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update the current user's profile
pub async fn update_me(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<UpdateUserInput>,
) -> impl IntoResponse {
    let service = UserService::new(state.db.clone());

    match service.update_user(current_user.0.user_id, input).await {
        Ok(user) => (StatusCode::OK, Json(user)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete the current user's account and everything it owns
pub async fn delete_me(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> impl IntoResponse {
    let service = UserService::new(state.db.clone());

    match service.delete_user(current_user.0.user_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
