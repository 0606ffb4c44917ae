use std::net::SocketAddr;

use chrono::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },
}

/// Runtime settings read from the environment (and `.env` when present).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub listen_addr: SocketAddr,
    pub reservation_ttl: Duration,
    pub require_payment: bool,
    pub payment_key_secret: String,
    pub db_max_connections: u32,
    pub sqlx_logging: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?;
        let listen_addr = parse_or(&lookup, "LISTEN_ADDR", SocketAddr::from(([0, 0, 0, 0], 8080)))?;
        let ttl_minutes: i64 = parse_or(&lookup, "RESERVATION_TTL_MINUTES", 10)?;
        if ttl_minutes <= 0 {
            return Err(invalid("RESERVATION_TTL_MINUTES", &ttl_minutes.to_string()));
        }
        let require_payment = parse_or(&lookup, "REQUIRE_PAYMENT", true)?;
        let payment_key_secret = match lookup("PAYMENT_KEY_SECRET") {
            Some(secret) if !secret.is_empty() => secret,
            _ if require_payment => {
                return Err(ConfigError::MissingEnvVar("PAYMENT_KEY_SECRET".to_string()));
            }
            _ => String::new(),
        };

        Ok(Self {
            database_url,
            listen_addr,
            reservation_ttl: Duration::minutes(ttl_minutes),
            require_payment,
            payment_key_secret,
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 10)?,
            sqlx_logging: parse_or(&lookup, "SQLX_LOGGING", false)?,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(raw) => raw.trim().parse().map_err(|_| invalid(name, &raw)),
        None => Ok(default),
    }
}

fn invalid(name: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        name: name.to_string(),
        value: value.to_string(),
    }
}
