//! Site settings route handlers.

use axum::{Json, extract::State};
use chrono::Utc;
use serde::Deserialize;
use tracing::instrument;

use crate::db::SettingsRepository;
use crate::db::settings::SettingsUpdate;
use crate::error::{AppError, Result};
use crate::middleware::{RequireAdminAuth, RequireStoreWrite};
use crate::models::Settings;
use crate::state::AppState;

/// Request body for updating settings. Omitted fields are left untouched.
#[derive(Debug, Deserialize)]
pub struct SettingsPayload {
    pub store_name: Option<String>,
    pub logo_url: Option<String>,
    pub banner_urls: Option<Vec<String>>,
}

/// Show the site settings.
///
/// A store that has never been configured gets an empty settings object
/// rather than a 404.
#[instrument(skip(state))]
pub async fn show(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<Settings>> {
    let settings = SettingsRepository::new(state.pool())
        .get()
        .await?
        .unwrap_or_else(|| Settings {
            store_name: None,
            logo_url: None,
            banner_urls: Vec::new(),
            updated_at: Utc::now(),
        });

    Ok(Json(settings))
}

/// Update the site settings (single-row upsert).
#[instrument(skip(state, payload))]
pub async fn update(
    RequireStoreWrite(_admin): RequireStoreWrite,
    State(state): State<AppState>,
    Json(payload): Json<SettingsPayload>,
) -> Result<Json<Settings>> {
    let update = SettingsUpdate {
        store_name: payload.store_name,
        logo_url: payload.logo_url,
        banner_urls: payload.banner_urls,
    };

    if update.is_empty() {
        return Err(AppError::BadRequest(
            "No settings data provided for update".to_string(),
        ));
    }

    let settings = SettingsRepository::new(state.pool()).upsert(&update).await?;
    Ok(Json(settings))
}
