//! Ports the authentication flow needs from the outside world

use async_trait::async_trait;

use crate::errors::DomainError;

/// One-way password hashing
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Returns whether the password matches the stored hash
    async fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError>;
}

/// Outgoing account e-mail
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send the link confirming ownership of an address
    async fn send_verification(&self, to: &str, token: &str) -> Result<(), DomainError>;

    /// Send the link for choosing a new password
    async fn send_password_reset(&self, to: &str, token: &str) -> Result<(), DomainError>;
}
