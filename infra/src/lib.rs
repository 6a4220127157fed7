//! # Infrastructure Layer
//!
//! Concrete adapters for the ports declared in `hc_core`:
//! - **Hashing**: bcrypt password hasher
//! - **Mail**: log-backed mailer that renders verification and reset links
//! - **Shipping**: flat-rate shipping calculator
//! - **Seed**: reference data and a bootstrap admin account loaded at startup

use hc_core::errors::DomainError;

/// Password hashing with bcrypt
pub mod hashing;

/// Outbound mail adapters
pub mod mail;

/// Shipping cost calculation
pub mod shipping;

/// Startup seed data
pub mod seed;

pub use hashing::BcryptHasher;
pub use mail::LogMailer;
pub use seed::{seed_admin, seed_reference_data, AdminCredentials};
pub use shipping::FlatRateShipping;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// bcrypt rejected the input or the cost factor
    #[error("Hashing error: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    /// A blocking task was cancelled or panicked
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::internal(err.to_string())
    }
}
