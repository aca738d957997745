//! Authentication extractors for admin routes.
//!
//! The admin panel is a JSON API, so rejections are plain status codes:
//! 401 when no admin is logged in, 403 when the logged-in admin's role does
//! not cover the operation. Any authenticated admin may read; mutating store
//! data requires the `admin` or `super_admin` role; managing admin users
//! requires `super_admin`.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use tower_sessions::Session;

use almacen_core::AdminRole;

use crate::models::{CurrentAdmin, session_keys};

/// Rejection for the auth extractors.
pub enum AuthRejection {
    /// No admin is logged in.
    Unauthorized,
    /// The admin's role does not allow the operation.
    Forbidden(&'static str),
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "Unauthorized: Not logged in").into_response()
            }
            Self::Forbidden(message) => (StatusCode::FORBIDDEN, message).into_response(),
        }
    }
}

async fn current_admin(parts: &mut Parts) -> Result<CurrentAdmin, AuthRejection> {
    // Get the session from extensions (set by SessionManagerLayer)
    let session = parts
        .extensions
        .get::<Session>()
        .ok_or(AuthRejection::Unauthorized)?;

    session
        .get::<CurrentAdmin>(session_keys::CURRENT_ADMIN)
        .await
        .ok()
        .flatten()
        .ok_or(AuthRejection::Unauthorized)
}

/// Extractor that requires a logged-in admin (any role).
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(RequireAdminAuth(admin): RequireAdminAuth) -> impl IntoResponse {
///     format!("Hello, {}!", admin.email)
/// }
/// ```
pub struct RequireAdminAuth(pub CurrentAdmin);

impl<S> FromRequestParts<S> for RequireAdminAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(current_admin(parts).await?))
    }
}

/// Extractor that requires an admin whose role may mutate store data.
pub struct RequireStoreWrite(pub CurrentAdmin);

impl<S> FromRequestParts<S> for RequireStoreWrite
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let admin = current_admin(parts).await?;

        if !admin.role.can_mutate() {
            return Err(AuthRejection::Forbidden(
                "Forbidden: Admin privileges required",
            ));
        }

        Ok(Self(admin))
    }
}

/// Extractor that requires the `super_admin` role.
pub struct RequireSuperAdmin(pub CurrentAdmin);

impl<S> FromRequestParts<S> for RequireSuperAdmin
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let admin = current_admin(parts).await?;

        if admin.role != AdminRole::SuperAdmin {
            return Err(AuthRejection::Forbidden(
                "Only super admins can access this resource",
            ));
        }

        Ok(Self(admin))
    }
}

/// Helper to set the current admin in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_admin(
    session: &Session,
    admin: &CurrentAdmin,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_ADMIN, admin).await
}

/// Helper to clear the current admin from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_admin(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentAdmin>(session_keys::CURRENT_ADMIN)
        .await?;
    Ok(())
}
