use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 3000, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// MongoDB connection string; falls back to `MONGODB_URI` when empty.
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_collection")]
    pub collection: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { url: String::new(), database: default_database(), collection: default_collection() }
    }
}

fn default_database() -> String { "concerts".to_string() }
fn default_collection() -> String { "concerts".to_string() }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        // Database URL may come from the environment instead of the TOML file.
        self.database.normalize_from_env();
        self.database.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be non-zero"));
        }
        if let Some(w) = self.worker_threads {
            if w == 0 {
                self.worker_threads = Some(4);
            }
        } else {
            self.worker_threads = Some(4);
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
        if self.url.trim().is_empty() {
            if let Ok(url) = std::env::var("MONGODB_URI") {
                self.url = url;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!(
                "database.url is empty; provide it in config.toml or via the MONGODB_URI environment variable"
            ));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("mongodb://") || lower.starts_with("mongodb+srv://")) {
            return Err(anyhow!("database.url must start with mongodb:// or mongodb+srv://"));
        }
        if self.database.trim().is_empty() {
            return Err(anyhow!("database.database must not be empty"));
        }
        if self.collection.trim().is_empty() {
            return Err(anyhow!("database.collection must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_usable() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.database.database, "concerts");
        assert_eq!(cfg.database.collection, "concerts");
    }

    #[test]
    fn server_normalize_fills_blanks() {
        let mut server = ServerConfig { host: "  ".into(), port: 8080, worker_threads: Some(0) };
        server.normalize().expect("normalize ok");
        assert_eq!(server.host, "127.0.0.1");
        assert_eq!(server.worker_threads, Some(4));
    }

    #[test]
    fn server_normalize_rejects_zero_port() {
        let mut server = ServerConfig { host: "0.0.0.0".into(), port: 0, worker_threads: None };
        assert!(server.normalize().is_err());
    }

    #[test]
    fn database_validate_requires_mongodb_scheme() {
        let cfg = DatabaseConfig { url: "postgres://x".into(), ..Default::default() };
        assert!(cfg.validate().is_err());

        let cfg = DatabaseConfig { url: "mongodb://localhost:27017".into(), ..Default::default() };
        assert!(cfg.validate().is_ok());

        let cfg = DatabaseConfig { url: "mongodb+srv://cluster.example.net".into(), ..Default::default() };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn toml_parse_round_trip() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 3000

            [database]
            url = "mongodb://localhost:27017"
            database = "concerts"
            collection = "concerts"
            "#,
        )
        .expect("parse toml");
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.database.url, "mongodb://localhost:27017");
    }
}
