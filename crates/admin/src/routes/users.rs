//! Admin user route handlers.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::db::AdminUserRepository;
use crate::error::Result;
use crate::middleware::RequireSuperAdmin;
use crate::models::AdminUser;
use crate::state::AppState;

/// List all admin users. Super admin only.
#[instrument(skip(state))]
pub async fn index(
    RequireSuperAdmin(_admin): RequireSuperAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<AdminUser>>> {
    let users = AdminUserRepository::new(state.pool()).list_all().await?;
    Ok(Json(users))
}
