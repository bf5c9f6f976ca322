//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.
//! Ninguna variable ausente provoca un panic: los problemas se acumulan y se
//! devuelven como `ConfigError`.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use super::database::{
    DatabaseConfig, DEFAULT_ACQUIRE_TIMEOUT_SECS, DEFAULT_MAX_CONNECTIONS,
    DEFAULT_MIN_CONNECTIONS,
};

const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173,http://localhost:3000";

/// Errores al cargar la configuración
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<String>),

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: String, value: String },

    #[error("DB_POOL_MIN ({min}) cannot exceed DB_POOL_MAX ({max})")]
    PoolBounds { min: u32, max: u32 },
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub cors_origins: Vec<String>,
    pub run_migrations: bool,
    pub database: DatabaseConfig,
}

impl EnvironmentConfig {
    /// Cargar la configuración desde el proceso
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Cargar la configuración desde una fuente arbitraria de variables
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let url = match get("DATABASE_URL") {
            Some(url) => url,
            None => {
                let parts = ["DB_USER", "DB_PASSWORD", "DB_DSN"];
                let missing: Vec<String> = parts
                    .iter()
                    .filter(|&&name| get(name).is_none())
                    .map(|name| name.to_string())
                    .collect();
                if !missing.is_empty() {
                    let mut reported = vec!["DATABASE_URL".to_string()];
                    reported.extend(missing);
                    return Err(ConfigError::Missing(reported));
                }
                compose_database_url(
                    &get("DB_USER").unwrap_or_default(),
                    &get("DB_PASSWORD").unwrap_or_default(),
                    &get("DB_DSN").unwrap_or_default(),
                )
            }
        };

        let min_connections = parse_or(&get, "DB_POOL_MIN", DEFAULT_MIN_CONNECTIONS)?;
        let max_connections = parse_or(&get, "DB_POOL_MAX", DEFAULT_MAX_CONNECTIONS)?;
        if min_connections > max_connections {
            return Err(ConfigError::PoolBounds {
                min: min_connections,
                max: max_connections,
            });
        }
        let acquire_timeout_secs =
            parse_or(&get, "DB_ACQUIRE_TIMEOUT_SECS", DEFAULT_ACQUIRE_TIMEOUT_SECS)?;

        let database = DatabaseConfig {
            url,
            max_connections,
            min_connections,
            acquire_timeout: Duration::from_secs(acquire_timeout_secs),
        };

        Ok(Self {
            environment: get("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            port: parse_or(&get, "PORT", 5000)?,
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            cors_origins: get("CORS_ORIGINS")
                .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            run_migrations: parse_or(&get, "RUN_MIGRATIONS", true)?,
            database,
        })
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// `DB_DSN` puede venir como `host:port/db` o ya con el esquema
fn compose_database_url(user: &str, password: &str, dsn: &str) -> String {
    let dsn = dsn
        .trim_start_matches("postgresql://")
        .trim_start_matches("postgres://");
    format!("postgres://{}:{}@{}", user, password, dsn)
}

fn parse_or<T, G>(get: &G, name: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(name) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            name: name.to_string(),
            value: raw,
        }),
    }
}
