use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreBackend {
    Memory,
    Postgres,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub url: Option<String>,
    pub user: Option<String>,
    #[serde(skip_serializing)]
    pub password: Option<String>,
    pub database: String,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("ACCESS_TOKEN_SECRET must be set outside development")]
    MissingSecret,

    #[error("DATABASE_URL is required for the postgres store backend")]
    MissingDatabaseUrl,

    #[error("JWT_EXPIRY_HOURS must be greater than zero")]
    ZeroExpiry,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from a preset chosen by `APP_ENV`, then apply overrides from `lookup`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let environment = match lookup("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_overrides(lookup)
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        // Server overrides
        if let Some(v) = lookup("HOST") {
            self.server.host = v;
        }
        if let Some(v) = lookup("PORT") {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }

        // Store overrides
        if let Some(v) = lookup("STORE_BACKEND") {
            self.store.backend = match v.to_ascii_lowercase().as_str() {
                "memory" => StoreBackend::Memory,
                "postgres" | "postgresql" => StoreBackend::Postgres,
                _ => self.store.backend,
            };
        }
        if let Some(v) = lookup("DATABASE_URL") {
            self.store.url = Some(v);
        }
        if let Some(v) = lookup("DB_USER") {
            self.store.user = Some(v);
        }
        if let Some(v) = lookup("DB_PASS") {
            self.store.password = Some(v);
        }
        if let Some(v) = lookup("DB_NAME") {
            self.store.database = v;
        }
        if let Some(v) = lookup("DATABASE_MAX_CONNECTIONS") {
            self.store.max_connections = v.parse().unwrap_or(self.store.max_connections);
        }
        if let Some(v) = lookup("DATABASE_CONNECTION_TIMEOUT") {
            self.store.connection_timeout = v.parse().unwrap_or(self.store.connection_timeout);
        }

        // Security overrides
        if let Some(v) = lookup("ACCESS_TOKEN_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Some(v) = lookup("JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v.parse().unwrap_or(self.security.jwt_expiry_hours);
        }
        if let Some(v) = lookup("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Some(v) = lookup("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.security.jwt_secret.is_empty() {
            return Err(ConfigError::MissingSecret);
        }
        if self.security.jwt_expiry_hours == 0 {
            return Err(ConfigError::ZeroExpiry);
        }
        if self.store.backend == StoreBackend::Postgres && self.store.url.is_none() {
            return Err(ConfigError::MissingDatabaseUrl);
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 2000,
            },
            store: StoreConfig {
                backend: StoreBackend::Memory,
                url: None,
                user: None,
                password: None,
                database: "bookshelf".to_string(),
                max_connections: 5,
                connection_timeout: 30,
            },
            security: SecurityConfig {
                jwt_secret: "bookshelf-development-secret".to_string(),
                jwt_expiry_hours: 24 * 7, // 1 week
                enable_cors: true,
                cors_origins: Vec::new(),
            },
        }
    }

    pub fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 2000,
            },
            store: StoreConfig {
                backend: StoreBackend::Postgres,
                url: None,
                user: None,
                password: None,
                database: "bookshelf".to_string(),
                max_connections: 10,
                connection_timeout: 10,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 24 * 7,
                enable_cors: true,
                cors_origins: Vec::new(),
            },
        }
    }

    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 2000,
            },
            store: StoreConfig {
                backend: StoreBackend::Postgres,
                url: None,
                user: None,
                password: None,
                database: "bookshelf".to_string(),
                max_connections: 20,
                connection_timeout: 5,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 1,
                enable_cors: true,
                cors_origins: Vec::new(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.server.port, 2000);
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert_eq!(config.security.jwt_expiry_hours, 168);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert_eq!(config.store.backend, StoreBackend::Postgres);
        assert_eq!(config.security.jwt_expiry_hours, 1);
        assert_eq!(config.validate(), Err(ConfigError::MissingSecret));
    }

    #[test]
    fn app_env_selects_preset() {
        let config = AppConfig::from_lookup(lookup_from(&[("APP_ENV", "prod")]));
        assert_eq!(config.environment, Environment::Production);

        let config = AppConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config.environment, Environment::Development);
    }

    #[test]
    fn overrides_apply_on_top_of_preset() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("APP_ENV", "production"),
            ("PORT", "8080"),
            ("DATABASE_URL", "postgres://localhost"),
            ("DB_USER", "reader"),
            ("ACCESS_TOKEN_SECRET", "topsecret"),
            ("JWT_EXPIRY_HOURS", "168"),
            ("SECURITY_CORS_ORIGINS", "https://a.example, https://b.example,"),
        ]));
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.store.user.as_deref(), Some("reader"));
        assert_eq!(config.security.jwt_expiry_hours, 168);
        assert_eq!(config.security.cors_origins, vec!["https://a.example", "https://b.example"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unparsable_override_keeps_preset_value() {
        let config = AppConfig::from_lookup(lookup_from(&[("PORT", "not-a-port"), ("STORE_BACKEND", "mongo")]));
        assert_eq!(config.server.port, 2000);
        assert_eq!(config.store.backend, StoreBackend::Memory);
    }

    #[test]
    fn postgres_backend_requires_url() {
        let config = AppConfig::from_lookup(lookup_from(&[("STORE_BACKEND", "postgres")]));
        assert_eq!(config.validate(), Err(ConfigError::MissingDatabaseUrl));
    }

    #[test]
    fn secrets_are_not_serialized() {
        let value = serde_json::to_value(AppConfig::development()).unwrap();
        assert!(value["security"].get("jwt_secret").is_none());
        assert!(value["store"].get("password").is_none());
    }
}
