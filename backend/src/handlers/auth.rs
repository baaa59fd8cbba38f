//! Authentication handlers

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::models::User;
use crate::services::AuthService;
use crate::AppState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
}

/// Register endpoint handler
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    use crate::services::auth::RegisterInput;

    let input = RegisterInput {
        email: body.email,
        password: body.password,
        full_name: body.full_name,
    };

    let auth_service = AuthService::new(state.db.clone(), &state.config);
    let user = auth_service.register(input).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Login endpoint handler
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let auth_service = AuthService::new(state.db.clone(), &state.config);
    let token = auth_service.login(&body.email, &body.password).await?;

    Ok(Json(TokenResponse {
        access_token: token.access_token,
        token_type: token.token_type,
    }))
}

/// Token refresh endpoint handler
pub async fn refresh(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> Result<Json<TokenResponse>, AppError> {
    let auth_service = AuthService::new(state.db.clone(), &state.config);
    let token = auth_service.refresh(current_user.0.user_id).await?;

    Ok(Json(TokenResponse {
        access_token: token.access_token,
        token_type: token.token_type,
    }))
}
