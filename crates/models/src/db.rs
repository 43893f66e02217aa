use mongodb::{Client, Database};
use once_cell::sync::Lazy;
use std::env;

pub static MONGODB_URI: Lazy<String> = Lazy::new(|| {
    // Load .env if present
    let _ = dotenvy::dotenv();
    env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string())
});

/// Connect using the `MONGODB_URI` environment variable (or the local default).
pub async fn connect(database: &str) -> anyhow::Result<Database> {
    let client = Client::with_uri_str(MONGODB_URI.as_str()).await?;
    Ok(client.database(database))
}

/// Connect using an explicit, already validated configuration.
pub async fn connect_with_config(cfg: &configs::DatabaseConfig) -> anyhow::Result<Database> {
    let client = Client::with_uri_str(&cfg.url).await?;
    Ok(client.database(&cfg.database))
}
