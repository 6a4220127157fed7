//! Main authentication service implementation

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::account::{normalize_email, Account, Role};
use crate::domain::entities::profile::{DoctorProfile, UserProfile};
use crate::domain::entities::token::{TokenPair, TokenPurpose};
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::repositories::{AccountRepository, ProfileRepository};
use crate::services::token::TokenService;

use super::ports::{Mailer, PasswordHasher};

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Self-registration of a patient
#[derive(Debug, Clone)]
pub struct UserRegistration {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Self-registration of a doctor
#[derive(Debug, Clone)]
pub struct DoctorRegistration {
    pub email: String,
    pub password: String,
    pub name: String,
    pub specialization_id: Uuid,
    pub license_number: String,
}

/// Authentication service for managing the account lifecycle
pub struct AuthService {
    /// Account repository for credentials and verification state
    accounts: Arc<dyn AccountRepository>,
    /// Profile repository receiving the profile created at registration
    profiles: Arc<dyn ProfileRepository>,
    /// Token service for JWT management
    tokens: Arc<TokenService>,
    hasher: Arc<dyn PasswordHasher>,
    mailer: Arc<dyn Mailer>,
}

pub(crate) fn validate_credentials(email: &str, password: &str) -> DomainResult<()> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(DomainError::validation("A valid email address is required"));
    }
    validate_password(password)
}

fn validate_password(password: &str) -> DomainResult<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(DomainError::validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

fn required(value: &str, field: &str) -> DomainResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DomainError::validation(format!("{field} is required")));
    }
    Ok(value.to_string())
}

impl AuthService {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        profiles: Arc<dyn ProfileRepository>,
        tokens: Arc<TokenService>,
        hasher: Arc<dyn PasswordHasher>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            accounts,
            profiles,
            tokens,
            hasher,
            mailer,
        }
    }

    /// Register a patient account
    ///
    /// The account starts unverified and a verification e-mail is sent.
    pub async fn register_user(&self, registration: UserRegistration) -> DomainResult<Account> {
        validate_credentials(&registration.email, &registration.password)?;
        let name = required(&registration.name, "Name")?;

        let account = self
            .create_account(&registration.email, &registration.password, Role::User)
            .await?;
        self.profiles
            .save_user_profile(UserProfile::new(account.id, name))
            .await?;

        self.send_verification(&account).await;
        tracing::info!(account_id = %account.id, "user registered");
        Ok(account)
    }

    /// Register a doctor account
    pub async fn register_doctor(&self, registration: DoctorRegistration) -> DomainResult<Account> {
        validate_credentials(&registration.email, &registration.password)?;
        let name = required(&registration.name, "Name")?;
        let license_number = required(&registration.license_number, "License number")?;

        if self
            .profiles
            .find_specialization(registration.specialization_id)
            .await?
            .is_none()
        {
            return Err(DomainError::validation("Unknown specialization"));
        }

        let account = self
            .create_account(&registration.email, &registration.password, Role::Doctor)
            .await?;
        self.profiles
            .save_doctor_profile(DoctorProfile::new(
                account.id,
                name,
                registration.specialization_id,
                license_number,
            ))
            .await?;

        self.send_verification(&account).await;
        tracing::info!(account_id = %account.id, "doctor registered");
        Ok(account)
    }

    async fn create_account(&self, email: &str, password: &str, role: Role) -> DomainResult<Account> {
        if self.accounts.find_by_email(email).await?.is_some() {
            return Err(DomainError::conflict("Email is already registered"));
        }
        let hash = self.hasher.hash(password).await?;
        self.accounts.create(Account::new(email, hash, role)).await
    }

    // Delivery failures are logged and do not undo the registration;
    // the user can request another link through the reset flow.
    async fn send_verification(&self, account: &Account) {
        let token = match self
            .tokens
            .issue(TokenPurpose::EmailVerification, account.id, account.role)
        {
            Ok(token) => token,
            Err(e) => {
                tracing::error!(account_id = %account.id, error = %e, "failed to issue verification token");
                return;
            }
        };
        if let Err(e) = self.mailer.send_verification(&account.email, &token).await {
            tracing::warn!(account_id = %account.id, error = %e, "failed to send verification e-mail");
        }
    }

    /// Mark the token's account as verified. Verifying twice is a no-op.
    pub async fn verify_email(&self, token: &str) -> DomainResult<Account> {
        let (account_id, _) = self.tokens.verify_subject(TokenPurpose::EmailVerification, token)?;
        let mut account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or(DomainError::Token(TokenError::Invalid))?;

        if account.is_verified {
            return Ok(account);
        }
        account.verify();
        let account = self.accounts.update(account).await?;
        tracing::info!(account_id = %account.id, "email verified");
        Ok(account)
    }

    /// Exchange credentials for a token pair
    ///
    /// Unknown e-mail and wrong password fail with the same error.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<TokenPair> {
        let account = match self.accounts.find_by_email(email).await? {
            Some(account) => account,
            None => {
                tracing::debug!("login rejected: unknown email");
                return Err(DomainError::InvalidCredentials);
            }
        };

        if !self.hasher.verify(password, &account.password_hash).await? {
            tracing::debug!(account_id = %account.id, "login rejected: wrong password");
            return Err(DomainError::InvalidCredentials);
        }

        self.tokens.issue_pair(account.id, account.role)
    }

    /// Exchange a refresh token for a new token pair
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<TokenPair> {
        let (account_id, _) = self.tokens.verify_subject(TokenPurpose::Refresh, refresh_token)?;
        let account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or(DomainError::Unauthorized)?;

        // The role is read from the account so role changes take effect
        self.tokens.issue_pair(account.id, account.role)
    }

    /// Send a password-reset link if the address belongs to an account.
    /// Always succeeds so callers cannot probe for registered addresses.
    pub async fn forgot_password(&self, email: &str) -> DomainResult<()> {
        let Some(account) = self.accounts.find_by_email(&normalize_email(email)).await? else {
            tracing::debug!("password reset requested for unknown email");
            return Ok(());
        };

        let token = self
            .tokens
            .issue(TokenPurpose::PasswordReset, account.id, account.role)?;
        if let Err(e) = self.mailer.send_password_reset(&account.email, &token).await {
            tracing::warn!(account_id = %account.id, error = %e, "failed to send password reset e-mail");
        }
        Ok(())
    }

    /// Set a new password using a reset token
    pub async fn reset_password(&self, token: &str, new_password: &str) -> DomainResult<()> {
        let (account_id, _) = self.tokens.verify_subject(TokenPurpose::PasswordReset, token)?;
        validate_password(new_password)?;

        let mut account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or(DomainError::Token(TokenError::Invalid))?;

        account.set_password_hash(self.hasher.hash(new_password).await?);
        self.accounts.update(account).await?;
        tracing::info!(account_id = %account_id, "password reset");
        Ok(())
    }
}
