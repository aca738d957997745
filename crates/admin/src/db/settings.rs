//! Site settings repository.
//!
//! Settings live in a single fixed row (id 1); writes are upserts so a
//! fresh database behaves the same as one that has been configured before.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::RepositoryError;
use crate::models::Settings;

/// The fixed primary key of the settings row.
const SETTINGS_ROW_ID: i32 = 1;

/// Internal row type for `PostgreSQL` settings queries.
#[derive(Debug, sqlx::FromRow)]
struct SettingsRow {
    store_name: Option<String>,
    logo_url: Option<String>,
    banner_urls: Vec<String>,
    updated_at: DateTime<Utc>,
}

impl From<SettingsRow> for Settings {
    fn from(row: SettingsRow) -> Self {
        Self {
            store_name: row.store_name,
            logo_url: row.logo_url,
            banner_urls: row.banner_urls,
            updated_at: row.updated_at,
        }
    }
}

/// Changes to apply to the settings row. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct SettingsUpdate {
    pub store_name: Option<String>,
    pub logo_url: Option<String>,
    pub banner_urls: Option<Vec<String>>,
}

impl SettingsUpdate {
    /// Whether the update carries no changes at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.store_name.is_none() && self.logo_url.is_none() && self.banner_urls.is_none()
    }
}

/// Repository for site settings.
pub struct SettingsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SettingsRepository<'a> {
    /// Create a new settings repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get the settings row, if one has been written yet.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self) -> Result<Option<Settings>, RepositoryError> {
        let row = sqlx::query_as::<_, SettingsRow>(
            r"
            SELECT store_name, logo_url, banner_urls, updated_at
            FROM settings
            WHERE id = $1
            ",
        )
        .bind(SETTINGS_ROW_ID)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Settings::from))
    }

    /// Apply an update, creating the row when it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn upsert(&self, update: &SettingsUpdate) -> Result<Settings, RepositoryError> {
        let row = sqlx::query_as::<_, SettingsRow>(
            r"
            INSERT INTO settings (id, store_name, logo_url, banner_urls)
            VALUES ($1, $2, $3, COALESCE($4, '{}'::text[]))
            ON CONFLICT (id) DO UPDATE SET
                store_name = COALESCE($2, settings.store_name),
                logo_url = COALESCE($3, settings.logo_url),
                banner_urls = COALESCE($4, settings.banner_urls),
                updated_at = NOW()
            RETURNING store_name, logo_url, banner_urls, updated_at
            ",
        )
        .bind(SETTINGS_ROW_ID)
        .bind(&update.store_name)
        .bind(&update.logo_url)
        .bind(&update.banner_urls)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }
}
