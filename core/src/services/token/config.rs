//! Configuration for the token service

use hc_shared::config::{Settings, SigningSecrets};

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// One HS256 secret per token purpose
    pub secrets: SigningSecrets,
    /// Value of the `iss` claim, checked on verification
    pub issuer: String,
}

impl TokenServiceConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            secrets: settings.secrets.clone(),
            issuer: settings.jwt_issuer.clone(),
        }
    }
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            secrets: SigningSecrets {
                verification: "development-verification-secret".to_string(),
                access: "development-access-secret".to_string(),
                refresh: "development-refresh-secret".to_string(),
                reset_password: "development-reset-secret".to_string(),
            },
            issuer: "healthcare".to_string(),
        }
    }
}
