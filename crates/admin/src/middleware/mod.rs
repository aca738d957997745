//! HTTP middleware and extractors for the admin panel.

pub mod auth;
pub mod session;

pub use auth::{RequireAdminAuth, RequireStoreWrite, RequireSuperAdmin};
pub use session::create_session_layer;
