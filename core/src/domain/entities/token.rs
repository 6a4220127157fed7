//! Token entities for JWT-based authentication.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::account::Role;

/// Access token expiration time (15 minutes)
pub const ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 15;

/// Refresh token expiration time (7 days)
pub const REFRESH_TOKEN_EXPIRY_DAYS: i64 = 7;

/// E-mail verification token expiration time (24 hours)
pub const VERIFICATION_TOKEN_EXPIRY_HOURS: i64 = 24;

/// Password reset token expiration time (1 hour)
pub const RESET_TOKEN_EXPIRY_MINUTES: i64 = 60;

/// What a token may be used for. Each purpose has its own signing secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenPurpose {
    Access,
    Refresh,
    EmailVerification,
    PasswordReset,
}

impl TokenPurpose {
    pub fn lifetime(&self) -> Duration {
        match self {
            TokenPurpose::Access => Duration::minutes(ACCESS_TOKEN_EXPIRY_MINUTES),
            TokenPurpose::Refresh => Duration::days(REFRESH_TOKEN_EXPIRY_DAYS),
            TokenPurpose::EmailVerification => Duration::hours(VERIFICATION_TOKEN_EXPIRY_HOURS),
            TokenPurpose::PasswordReset => Duration::minutes(RESET_TOKEN_EXPIRY_MINUTES),
        }
    }
}

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account ID)
    pub sub: String,

    pub role: Role,

    pub purpose: TokenPurpose,

    /// Issuer
    pub iss: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

impl Claims {
    /// Creates claims for the given purpose, expiring after the purpose's lifetime
    pub fn new(purpose: TokenPurpose, account_id: Uuid, role: Role, issuer: &str) -> Self {
        let now = Utc::now();
        let expiry = now + purpose.lifetime();

        Self {
            sub: account_id.to_string(),
            role,
            purpose,
            iss: issuer.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Gets the account ID from the claims
    pub fn account_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

/// Access and refresh token returned on login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
    pub role: Role,
}

impl TokenPair {
    pub fn new(access_token: String, refresh_token: String, role: Role) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: TokenPurpose::Access.lifetime().num_seconds(),
            role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_expiry_follows_purpose() {
        let id = Uuid::new_v4();
        let access = Claims::new(TokenPurpose::Access, id, Role::User, "hc");
        let refresh = Claims::new(TokenPurpose::Refresh, id, Role::User, "hc");
        assert_eq!(access.exp - access.iat, ACCESS_TOKEN_EXPIRY_MINUTES * 60);
        assert_eq!(refresh.exp - refresh.iat, REFRESH_TOKEN_EXPIRY_DAYS * 86_400);
        assert_eq!(access.account_id().unwrap(), id);
        assert!(!access.is_expired());
    }

    #[test]
    fn test_token_pair_expires_in() {
        let pair = TokenPair::new("a".into(), "r".into(), Role::Doctor);
        assert_eq!(pair.expires_in, 900);
        assert_eq!(pair.token_type, "Bearer");
    }
}
