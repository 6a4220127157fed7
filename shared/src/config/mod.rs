//! Process settings loaded once at startup
//!
//! Settings are split by business area:
//! - `auth` - signing secrets for the four token purposes and the password hash cost
//! - `email` - outbound e-mail sender credentials
//! - `server` - listener ports and the graceful shutdown period
//!
//! Every field is read from a named environment variable. String fields are
//! passed through as-is (a missing variable reads as an empty string); the two
//! integer fields must parse or loading fails, naming the offending variable.

pub mod auth;
pub mod email;
pub mod server;

use std::fmt;

use thiserror::Error;

pub use auth::SigningSecrets;
pub use email::EmailSettings;
pub use server::ServerSettings;

/// Environment variable names read by [`Settings::from_lookup`]
pub mod keys {
    pub const PORT: &str = "PORT";
    pub const FE_PORT: &str = "FE_PORT";
    pub const DATABASE_URL: &str = "DATABASE_URL";
    pub const JWT_ISSUER: &str = "JWT_ISSUER";
    pub const EMAIL_IDENTITY: &str = "EMAIL_IDENTITY";
    pub const EMAIL_USERNAME: &str = "EMAIL_USERNAME";
    pub const EMAIL_PASSWORD: &str = "EMAIL_PASSWORD";
    pub const EMAIL_HOST: &str = "EMAIL_HOST";
    pub const EMAIL_PORT: &str = "EMAIL_PORT";
    pub const VERIFICATION_SECRET: &str = "VERIFICATION_SECRET";
    pub const ACCESS_SECRET: &str = "ACCESS_SECRET";
    pub const REFRESH_SECRET: &str = "REFRESH_SECRET";
    pub const RESET_PASSWORD_SECRET: &str = "RESET_PASSWORD_SECRET";
    pub const SHIPPING_API_KEY: &str = "SHIPPING_API_KEY";
    pub const HASH_COST: &str = "HASH_COST";
    pub const GRACEFUL_PERIOD: &str = "GRACEFUL_PERIOD";
}

/// Fatal configuration errors. None of these are recoverable at runtime.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} must be an integer, got {value:?}")]
    InvalidNumber { field: &'static str, value: String },
}

/// Immutable settings shared by every component for the process lifetime
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    pub server: ServerSettings,
    pub database_url: String,
    pub jwt_issuer: String,
    pub email: EmailSettings,
    pub secrets: SigningSecrets,
    pub shipping_api_key: String,
    /// bcrypt cost factor
    pub hash_cost: u32,
}

impl Settings {
    /// Load settings from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |key: &str| lookup(key).unwrap_or_default();

        let hash_cost = parse_number::<u32>(keys::HASH_COST, &text(keys::HASH_COST))?;
        let graceful_period =
            parse_number::<u64>(keys::GRACEFUL_PERIOD, &text(keys::GRACEFUL_PERIOD))?;

        Ok(Self {
            server: ServerSettings {
                port: text(keys::PORT),
                fe_port: text(keys::FE_PORT),
                graceful_period,
            },
            database_url: text(keys::DATABASE_URL),
            jwt_issuer: text(keys::JWT_ISSUER),
            email: EmailSettings {
                identity: text(keys::EMAIL_IDENTITY),
                username: text(keys::EMAIL_USERNAME),
                password: text(keys::EMAIL_PASSWORD),
                host: text(keys::EMAIL_HOST),
                port: text(keys::EMAIL_PORT),
            },
            secrets: SigningSecrets {
                verification: text(keys::VERIFICATION_SECRET),
                access: text(keys::ACCESS_SECRET),
                refresh: text(keys::REFRESH_SECRET),
                reset_password: text(keys::RESET_PASSWORD_SECRET),
            },
            shipping_api_key: text(keys::SHIPPING_API_KEY),
            hash_cost,
        })
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("server", &self.server)
            .field("database_url", &self.database_url)
            .field("jwt_issuer", &self.jwt_issuer)
            .field("email", &self.email)
            .field("secrets", &self.secrets)
            .field("shipping_api_key", &"<redacted>")
            .field("hash_cost", &self.hash_cost)
            .finish()
    }
}

fn parse_number<T: std::str::FromStr>(field: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse::<T>().map_err(|_| ConfigError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn complete() -> HashMap<&'static str, String> {
        let mut vars = HashMap::new();
        vars.insert(keys::PORT, "8080".to_string());
        vars.insert(keys::FE_PORT, "3000".to_string());
        vars.insert(keys::JWT_ISSUER, "healthcare".to_string());
        vars.insert(keys::ACCESS_SECRET, "access".to_string());
        vars.insert(keys::REFRESH_SECRET, "refresh".to_string());
        vars.insert(keys::VERIFICATION_SECRET, "verify".to_string());
        vars.insert(keys::RESET_PASSWORD_SECRET, "reset".to_string());
        vars.insert(keys::EMAIL_PASSWORD, "hunter2".to_string());
        vars.insert(keys::HASH_COST, "10".to_string());
        vars.insert(keys::GRACEFUL_PERIOD, "5".to_string());
        vars
    }

    fn load(vars: &HashMap<&'static str, String>) -> Result<Settings, ConfigError> {
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_loads_complete_environment() {
        let settings = load(&complete()).unwrap();
        assert_eq!(settings.server.port, "8080");
        assert_eq!(settings.server.graceful_period, 5);
        assert_eq!(settings.hash_cost, 10);
        assert_eq!(settings.secrets.access, "access");
        assert_eq!(settings.secrets.reset_password, "reset");
    }

    #[test]
    fn test_missing_string_fields_read_as_empty() {
        let settings = load(&complete()).unwrap();
        assert_eq!(settings.database_url, "");
        assert_eq!(settings.shipping_api_key, "");
        assert_eq!(settings.email.host, "");
    }

    #[test]
    fn test_non_integer_hash_cost_is_fatal() {
        let mut vars = complete();
        vars.insert(keys::HASH_COST, "ten".to_string());
        let err = load(&vars).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber { field: keys::HASH_COST, value: "ten".to_string() }
        );
        assert!(err.to_string().contains("HASH_COST"));
    }

    #[test]
    fn test_non_integer_graceful_period_is_fatal() {
        let mut vars = complete();
        vars.insert(keys::GRACEFUL_PERIOD, "5s".to_string());
        let err = load(&vars).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { field: "GRACEFUL_PERIOD", .. }));
    }

    #[test]
    fn test_missing_integer_field_is_fatal() {
        let mut vars = complete();
        vars.remove(keys::GRACEFUL_PERIOD);
        assert!(load(&vars).is_err());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let rendered = format!("{:?}", load(&complete()).unwrap());
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("\"access\""));
    }
}
