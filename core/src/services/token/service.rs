//! Main token service implementation

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::domain::entities::account::Role;
use crate::domain::entities::token::{Claims, TokenPair, TokenPurpose};
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

struct PurposeKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl PurposeKeys {
    fn from_secret(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

/// Service for issuing and verifying purpose-bound JWTs
pub struct TokenService {
    config: TokenServiceConfig,
    access: PurposeKeys,
    refresh: PurposeKeys,
    verification: PurposeKeys,
    reset_password: PurposeKeys,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service instance
    pub fn new(config: TokenServiceConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.validate_exp = true;

        Self {
            access: PurposeKeys::from_secret(&config.secrets.access),
            refresh: PurposeKeys::from_secret(&config.secrets.refresh),
            verification: PurposeKeys::from_secret(&config.secrets.verification),
            reset_password: PurposeKeys::from_secret(&config.secrets.reset_password),
            validation,
            config,
        }
    }

    fn keys(&self, purpose: TokenPurpose) -> &PurposeKeys {
        match purpose {
            TokenPurpose::Access => &self.access,
            TokenPurpose::Refresh => &self.refresh,
            TokenPurpose::EmailVerification => &self.verification,
            TokenPurpose::PasswordReset => &self.reset_password,
        }
    }

    pub fn issuer(&self) -> &str {
        &self.config.issuer
    }

    /// Signs a token for the given purpose
    pub fn issue(&self, purpose: TokenPurpose, account_id: Uuid, role: Role) -> Result<String, DomainError> {
        let claims = Claims::new(purpose, account_id, role, &self.config.issuer);
        self.encode_jwt(&claims)
    }

    /// Generates an access and refresh token for an account
    pub fn issue_pair(&self, account_id: Uuid, role: Role) -> Result<TokenPair, DomainError> {
        let access_token = self.issue(TokenPurpose::Access, account_id, role)?;
        let refresh_token = self.issue(TokenPurpose::Refresh, account_id, role)?;
        Ok(TokenPair::new(access_token, refresh_token, role))
    }

    pub(crate) fn encode_jwt(&self, claims: &Claims) -> Result<String, DomainError> {
        let header = Header::new(Algorithm::HS256);
        encode(&header, claims, &self.keys(claims.purpose).encoding)
            .map_err(|_| DomainError::Token(TokenError::GenerationFailed))
    }

    /// Verifies a token under the given purpose and returns its claims
    ///
    /// Signature, expiry and issuer are checked first; a token whose
    /// `purpose` claim differs is rejected even if the secrets were reused.
    pub fn verify(&self, purpose: TokenPurpose, token: &str) -> Result<Claims, DomainError> {
        let data = decode::<Claims>(token, &self.keys(purpose).decoding, &self.validation)
            .map_err(TokenError::from)?;

        if data.claims.purpose != purpose {
            return Err(TokenError::WrongPurpose.into());
        }
        Ok(data.claims)
    }

    /// Verifies a token and parses its subject
    pub fn verify_subject(&self, purpose: TokenPurpose, token: &str) -> Result<(Uuid, Claims), DomainError> {
        let claims = self.verify(purpose, token)?;
        let account_id = claims
            .account_id()
            .map_err(|_| DomainError::Token(TokenError::Invalid))?;
        Ok((account_id, claims))
    }
}
