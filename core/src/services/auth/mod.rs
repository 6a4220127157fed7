//! Authentication service module
//!
//! This module provides the account lifecycle:
//! - User and doctor self-registration with e-mail verification
//! - Login and refresh-token rotation
//! - Forgotten-password reset through an e-mailed token

mod ports;
mod service;

#[cfg(test)]
pub(crate) mod tests;

pub use ports::{Mailer, PasswordHasher};
pub use service::{AuthService, DoctorRegistration, UserRegistration, MIN_PASSWORD_LENGTH};
pub(crate) use service::validate_credentials;
