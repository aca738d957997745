//! Admin authentication route handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use almacen_core::Email;

use crate::db::AdminUserRepository;
use crate::error::{AppError, Result};
use crate::middleware::auth::{clear_current_admin, set_current_admin};
use crate::models::CurrentAdmin;
use crate::services::auth::{AuthError, verify_password};
use crate::state::AppState;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Log in with email and password.
///
/// A wrong email and a wrong password produce the same response, so the
/// endpoint cannot be used to probe which admin accounts exist.
#[instrument(skip(state, session, request))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<LoginRequest>,
) -> Result<Json<CurrentAdmin>> {
    let email = Email::parse(request.email.trim())
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let (user, stored_hash) = AdminUserRepository::new(state.pool())
        .find_for_login(&email)
        .await?
        .ok_or(AppError::Auth(AuthError::InvalidCredentials))?;

    verify_password(&request.password, &stored_hash)?;

    let admin = CurrentAdmin::from(&user);
    set_current_admin(&session, &admin)
        .await
        .map_err(|e| AppError::Internal(format!("failed to write session: {e}")))?;

    tracing::info!(admin_id = %admin.id, "admin logged in");

    Ok(Json(admin))
}

/// Log out the current admin.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<StatusCode> {
    clear_current_admin(&session)
        .await
        .map_err(|e| AppError::Internal(format!("failed to clear session: {e}")))?;

    Ok(StatusCode::NO_CONTENT)
}
