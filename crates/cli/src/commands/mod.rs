//! CLI command implementations.

pub mod admin;
pub mod migrate;
pub mod seed;

use secrecy::SecretString;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Read the database URL from the environment (`.env` supported).
pub fn database_url() -> Result<SecretString, Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    std::env::var("ALMACEN_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| "ALMACEN_DATABASE_URL is not set".into())
}

/// Connect with a small pool suited to one-shot commands.
pub async fn connect() -> Result<PgPool, Box<dyn std::error::Error>> {
    use secrecy::ExposeSecret;

    let url = database_url()?;
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(url.expose_secret())
        .await?;
    Ok(pool)
}
