//! Service configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `DATABASE_URL` - `PostgreSQL` connection string
//! - `ADMIN_TOKEN` - bearer token expected on back-office routes
//!
//! ## Optional
//! - `HOST` - bind address (default: 0.0.0.0)
//! - `PORT` - listen port (default: 8080)
//! - `SHIPPING_FALLBACK_STATE` - state whose price is charged when a shipping
//!   option has none for the destination (default: SP)
//! - `ADDRESS_LOOKUP_URL` - ViaCEP-compatible base URL (default:
//!   <https://viacep.com.br/ws>)

use std::env;

use thiserror::Error;

use crate::domain::state::StateCode;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_ADDRESS_LOOKUP_URL: &str = "https://viacep.com.br/ws";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub admin_token: String,
    pub host: String,
    pub port: u16,
    pub shipping_fallback_state: StateCode,
    pub address_lookup_url: String,
}

// Keeps credentials out of logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("admin_token", &"[REDACTED]")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("shipping_fallback_state", &self.shipping_fallback_state)
            .field("address_lookup_url", &self.address_lookup_url)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; blank values count as
    /// unset.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let require =
            |key: &str| get(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()));

        let port = match get("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| ConfigError::InvalidEnvVar("PORT".into(), format!("{}", e)))?,
            None => DEFAULT_PORT,
        };
        let shipping_fallback_state = match get("SHIPPING_FALLBACK_STATE") {
            Some(raw) => raw.parse().map_err(|_| {
                ConfigError::InvalidEnvVar(
                    "SHIPPING_FALLBACK_STATE".into(),
                    format!("'{}' is not a state code", raw),
                )
            })?,
            None => StateCode::Sp,
        };

        Ok(Config {
            database_url: require("DATABASE_URL")?,
            admin_token: require("ADMIN_TOKEN")?,
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            shipping_fallback_state,
            address_lookup_url: get("ADDRESS_LOOKUP_URL")
                .unwrap_or_else(|| DEFAULT_ADDRESS_LOOKUP_URL.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    const REQUIRED: [(&str, &str); 2] = [
        ("DATABASE_URL", "postgres://localhost/lockpharma"),
        ("ADMIN_TOKEN", "s3cr3t-admin"),
    ];

    #[test]
    fn defaults_apply() {
        let config = load(&REQUIRED).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.shipping_fallback_state, StateCode::Sp);
        assert_eq!(config.address_lookup_url, "https://viacep.com.br/ws");
    }

    #[test]
    fn missing_admin_token_is_reported() {
        let err = load(&REQUIRED[..1]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref k) if k == "ADMIN_TOKEN"));
    }

    #[test]
    fn bad_port_and_state_are_invalid() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("PORT", "eighty"));
        assert!(matches!(load(&vars), Err(ConfigError::InvalidEnvVar(ref k, _)) if k == "PORT"));

        let mut vars = REQUIRED.to_vec();
        vars.push(("SHIPPING_FALLBACK_STATE", "XX"));
        assert!(matches!(
            load(&vars),
            Err(ConfigError::InvalidEnvVar(ref k, _)) if k == "SHIPPING_FALLBACK_STATE"
        ));
    }

    #[test]
    fn overrides_are_read() {
        let mut vars = REQUIRED.to_vec();
        vars.extend([("PORT", "3001"), ("SHIPPING_FALLBACK_STATE", "rj"), ("HOST", " ")]);
        let config = load(&vars).unwrap();
        assert_eq!(config.port, 3001);
        assert_eq!(config.shipping_fallback_state, StateCode::Rj);
        assert_eq!(config.host, "0.0.0.0");
    }

    #[test]
    fn debug_redacts_secrets() {
        let rendered = format!("{:?}", load(&REQUIRED).unwrap());
        assert!(!rendered.contains("s3cr3t-admin"));
        assert!(!rendered.contains("postgres://"));
    }
}
