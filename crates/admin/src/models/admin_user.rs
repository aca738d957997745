//! Admin user domain types.
//!
//! These types represent validated domain objects for admin authentication.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use almacen_core::{AdminRole, AdminUserId, Email};

/// An admin user (domain type). The password hash never leaves the db layer.
#[derive(Debug, Clone, Serialize)]
pub struct AdminUser {
    /// Unique admin user ID.
    pub id: AdminUserId,
    /// Admin's email address.
    pub email: Email,
    /// Admin's role/permission level.
    pub role: AdminRole,
    /// When the admin was created.
    pub created_at: DateTime<Utc>,
    /// When the admin was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Session-stored admin identity.
///
/// Minimal data stored in the session to identify the logged-in admin and
/// gate role-restricted operations without a database round trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// Admin's database ID.
    pub id: AdminUserId,
    /// Admin's email address.
    pub email: Email,
    /// Admin's role.
    pub role: AdminRole,
}

impl From<&AdminUser> for CurrentAdmin {
    fn from(user: &AdminUser) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            role: user.role,
        }
    }
}
