use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::clients::{agify::AGIFY_API, genderize::GENDERIZE_API, nationalize::NATIONALIZE_API};

pub const DEFAULT_ADMIN_PASSWORD: &str = "change-me";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub database: DatabaseConfig,

    pub services: ServicesConfig,

    pub auth: AuthConfig,

    pub enrichment: EnrichmentConfig,

    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub log_level: String,

    /// `pretty` or `json`
    pub log_format: String,

    /// Number of tokio worker threads. 0 uses the number of CPU cores.
    pub worker_threads: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            worker_threads: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: String,

    pub request_timeout_seconds: u64,

    /// Render every envelope with HTTP 200 and report failures only through
    /// the body's `status` field. Disable to get conventional status codes.
    pub uniform_status: bool,

    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: "0.0.0.0:8080".to_string(),
            request_timeout_seconds: 10,
            uniform_status: true,
            cors_allowed_origins: vec![
                "http://localhost:8080".to_string(),
                "http://127.0.0.1:8080".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `sqlite:…` or `postgres://…`
    pub url: String,

    pub max_connections: u32,

    pub min_connections: u32,

    pub connect_timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:data/filmoteka.db".to_string(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout_seconds: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServicesConfig {
    /// `/person/*` and `/people/*`
    pub people: bool,

    /// `/actor*`, `/movie*` and `/actor_movie/*`
    pub filmoteka: bool,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            people: true,
            filmoteka: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub username: String,

    pub password: String,

    pub realm: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: DEFAULT_ADMIN_PASSWORD.to_string(),
            realm: "filmoteka".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentConfig {
    pub enabled: bool,

    /// Run the three lookups concurrently instead of one after another.
    pub concurrent: bool,

    pub agify_url: String,

    pub genderize_url: String,

    pub nationalize_url: String,

    pub request_timeout_seconds: u64,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            concurrent: true,
            agify_url: AGIFY_API.to_string(),
            genderize_url: GENDERIZE_API.to_string(),
            nationalize_url: NATIONALIZE_API.to_string(),
            request_timeout_seconds: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,

    pub loki_enabled: bool,

    pub loki_url: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
            loki_enabled: false,
            loki_url: "http://localhost:3100".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::load_file()?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn load_file() -> Result<Self> {
        let paths = Self::config_paths();

        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Overrides file values with environment variables, when set.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(address) = lookup("HTTP_ADDRESS") {
            self.server.address = address;
        }
        if let Some(timeout) = lookup("HTTP_TIMEOUT") {
            match timeout.trim().trim_end_matches('s').parse() {
                Ok(secs) => self.server.request_timeout_seconds = secs,
                Err(_) => warn!("Ignoring invalid HTTP_TIMEOUT value: {}", timeout),
            }
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            self.general.log_level = level;
        }
        if let Some(url) = lookup("DATABASE_URL").or_else(|| lookup("PG_URL")) {
            self.database.url = url;
        }
        if let Some(user) = lookup("ADMIN_USER") {
            self.auth.username = user;
        }
        if let Some(password) = lookup("ADMIN_PASSWORD") {
            self.auth.password = password;
        }
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("filmoteka").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".filmoteka").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();

        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.address.trim().is_empty() {
            anyhow::bail!("Server address cannot be empty");
        }

        if self.server.request_timeout_seconds == 0 {
            anyhow::bail!("Request timeout must be > 0");
        }

        if self.database.url.trim().is_empty() {
            anyhow::bail!("Database URL cannot be empty");
        }

        if self.database.max_connections == 0 {
            anyhow::bail!("Database pool must allow at least one connection");
        }

        if self.enrichment.enabled && self.enrichment.request_timeout_seconds == 0 {
            anyhow::bail!("Enrichment timeout must be > 0 when enrichment is enabled");
        }

        if self.services.filmoteka
            && (self.auth.username.is_empty() || self.auth.password.is_empty())
        {
            anyhow::bail!("Admin username and password are required for the filmoteka service");
        }

        if !self.services.people && !self.services.filmoteka {
            anyhow::bail!("At least one of services.people or services.filmoteka must be enabled");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.address, "0.0.0.0:8080");
        assert!(config.server.uniform_status);
        assert!(config.enrichment.concurrent);
        assert_eq!(config.enrichment.agify_url, "https://api.agify.io");
        assert_eq!(config.auth.realm, "filmoteka");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();

        assert!(toml_str.contains("[server]"));
        assert!(toml_str.contains("[database]"));
        assert!(toml_str.contains("[enrichment]"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"

            [enrichment]
            concurrent = false
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert!(!config.enrichment.concurrent);
        assert_eq!(config.database.url, "sqlite:data/filmoteka.db");
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("HTTP_ADDRESS", "127.0.0.1:9000"),
            ("HTTP_TIMEOUT", "4s"),
            ("PG_URL", "postgres://app:secret@db/filmoteka"),
            ("ADMIN_PASSWORD", "hunter2"),
        ]);

        let mut config = Config::default();
        config.apply_env(|key| env.get(key).map(ToString::to_string));

        assert_eq!(config.server.address, "127.0.0.1:9000");
        assert_eq!(config.server.request_timeout_seconds, 4);
        assert_eq!(config.database.url, "postgres://app:secret@db/filmoteka");
        assert_eq!(config.auth.username, "admin");
        assert_eq!(config.auth.password, "hunter2");
    }

    #[test]
    fn test_validate_requires_credentials_for_filmoteka() {
        let mut config = Config::default();
        config.auth.password = String::new();
        assert!(config.validate().is_err());

        config.services.filmoteka = false;
        assert!(config.validate().is_ok());

        config.services.people = false;
        assert!(config.validate().is_err());
    }
}
