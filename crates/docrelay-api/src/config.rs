use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub mongodb: MongoDbConfig,
    pub provider: ProviderConfig,
    pub logging: LoggingConfig,

    // Secrets (from ENV only)
    #[serde(default)]
    pub mongodb_uri: String,
    #[serde(default)]
    pub chatpdf_api_key: String,
    #[serde(default)]
    pub jwt_secret: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    pub enabled: bool,
    pub origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MongoDbConfig {
    pub database: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    pub base_url: String,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
}

fn default_max_attempts() -> usize {
    3
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Config {
    /// Load configuration from TOML files and environment variables
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. config/default.toml
    /// 2. config/{ENV}.toml (if ENV is set)
    /// 3. Environment variables (with SERVER_, MONGODB_, etc. prefixes)
    ///
    /// Secrets never live in TOML; a missing secret is fatal at
    /// startup rather than a per-request error.
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("ENV").unwrap_or_else(|_| "dev".to_string());

        let builder = ConfigLoader::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::default()
                    .prefix("SERVER")
                    .separator("_")
                    .try_parsing(true),
            )
            .add_source(
                Environment::default()
                    .prefix("MONGODB")
                    .separator("_")
                    .try_parsing(true),
            )
            .add_source(
                Environment::default()
                    .prefix("PROVIDER")
                    .separator("_")
                    .try_parsing(true),
            )
            .add_source(
                Environment::default()
                    .prefix("LOG")
                    .separator("_")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        let mut cfg: Config = config.try_deserialize()?;

        // Load secrets from ENV (not in TOML)
        cfg.mongodb_uri = std::env::var("MONGODB_URI").map_err(|_| {
            ConfigError::Message("MONGODB_URI environment variable is required".to_string())
        })?;
        cfg.chatpdf_api_key = std::env::var("CHATPDF_API_KEY").map_err(|_| {
            ConfigError::Message("CHATPDF_API_KEY environment variable is required".to_string())
        })?;
        cfg.jwt_secret = std::env::var("JWT_SECRET").map_err(|_| {
            ConfigError::Message("JWT_SECRET environment variable is required".to_string())
        })?;

        Ok(cfg)
    }

    /// Load config from a specific path (useful for testing)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let builder = ConfigLoader::builder().add_source(File::from(path.as_ref()));

        let config = builder.build()?;
        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_structure() {
        let toml = r#"
            [server]
            host = "127.0.0.1"
            port = 5000

            [cors]
            enabled = true
            origins = ["http://localhost:3000"]

            [mongodb]
            database = "docrelay"

            [provider]
            base_url = "https://api.chatpdf.com/v1"
            max_attempts = 3

            [logging]
            level = "debug"
            format = "json"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.mongodb.database, "docrelay");
        assert_eq!(config.provider.max_attempts, 3);
    }

    #[test]
    fn test_max_attempts_defaults_to_three() {
        let toml = r#"
            [server]
            host = "0.0.0.0"
            port = 5000

            [cors]
            enabled = false
            origins = []

            [mongodb]
            database = "docrelay"

            [provider]
            base_url = "https://api.chatpdf.com/v1"

            [logging]
            level = "info"
            format = "pretty"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.provider.max_attempts, 3);
    }

    #[test]
    fn test_from_file_loads_an_explicit_path() {
        let toml = r#"
            [server]
            host = "127.0.0.1"
            port = 8080

            [cors]
            enabled = false
            origins = []

            [mongodb]
            database = "docrelay-test"

            [provider]
            base_url = "http://localhost:9000"
            max_attempts = 2

            [logging]
            level = "debug"
            format = "pretty"
        "#;

        let path = std::env::temp_dir().join("docrelay-from-file-test.toml");
        std::fs::write(&path, toml).unwrap();

        let config = Config::from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.mongodb.database, "docrelay-test");
        assert_eq!(config.provider.max_attempts, 2);
        // Secrets never come from TOML.
        assert!(config.jwt_secret.is_empty());
    }
}
