//! Site settings domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Site-wide settings: a single row holding the store's presentation data.
#[derive(Debug, Clone, Serialize)]
pub struct Settings {
    pub store_name: Option<String>,
    pub logo_url: Option<String>,
    pub banner_urls: Vec<String>,
    pub updated_at: DateTime<Utc>,
}
