use axum::{Json, extract::State};

use crate::{
    AppState,
    error::{AppError, Result},
    models::{AuthResponse, LoginRequest},
    utils::jwt,
};

/// Single admin principal; credentials come from the environment, not the
/// database. The same error is returned for a wrong email and a wrong
/// password.
pub async fn admin_login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let auth = &state.auth;

    if payload.email != auth.admin_email {
        return Err(AppError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }

    let password_matches = bcrypt::verify(&payload.password, &auth.admin_password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {}", e)))?;

    if !password_matches {
        return Err(AppError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }

    let token = jwt::generate_token(&auth.jwt_secret, &auth.admin_email)?;

    Ok(Json(AuthResponse { token }))
}
