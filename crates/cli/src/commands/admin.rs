//! Admin user management commands.

use almacen_admin::db::AdminUserRepository;
use almacen_admin::services::auth::hash_password;
use almacen_core::{AdminRole, Email};

use super::connect;

/// Create an admin user with an Argon2-hashed password.
///
/// # Errors
///
/// Returns an error for an invalid email or role, a weak password, or a
/// database failure (including a duplicate email).
pub async fn create_user(
    email: &str,
    password: &str,
    role: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let email = Email::parse(email)?;
    let role = role.parse::<AdminRole>()?;
    let password_hash = hash_password(password)?;

    let pool = connect().await?;
    let user = AdminUserRepository::new(&pool)
        .create(&email, &password_hash, role)
        .await?;

    tracing::info!(id = %user.id, email = %user.email, role = %user.role, "admin user created");

    Ok(())
}
