//! Database migration command.
//!
//! The storefront and admin binaries share one database, so there is a
//! single migration set, embedded at compile time from
//! `crates/cli/migrations/`.

use super::connect;

/// Run all pending migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let pool = connect().await?;

    tracing::info!("Running migrations");
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Migrations complete");

    Ok(())
}
