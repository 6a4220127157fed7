//! bcrypt implementation of the core `PasswordHasher` port

use async_trait::async_trait;
use hc_core::errors::DomainError;
use hc_core::services::auth::PasswordHasher;
use tracing::warn;

use crate::InfrastructureError;

const MIN_COST: u32 = 4;
const MAX_COST: u32 = 31;

/// Password hasher backed by bcrypt
///
/// Hashing runs on the blocking thread pool since a single bcrypt round at
/// a production cost takes tens of milliseconds.
#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    /// Create a hasher with the given cost factor.
    ///
    /// Costs outside bcrypt's accepted range are clamped to the nearest bound.
    pub fn new(cost: u32) -> Self {
        let clamped = cost.clamp(MIN_COST, MAX_COST);
        if clamped != cost {
            warn!(requested = cost, applied = clamped, "bcrypt cost out of range, clamping");
        }
        Self { cost: clamped }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

#[async_trait]
impl PasswordHasher for BcryptHasher {
    async fn hash(&self, password: &str) -> Result<String, DomainError> {
        let password = password.to_owned();
        let cost = self.cost;
        let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(InfrastructureError::from)?
            .map_err(InfrastructureError::from)?;
        Ok(hashed)
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        let password = password.to_owned();
        let hash = hash.to_owned();
        let outcome = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(InfrastructureError::from)?;

        // A malformed stored hash is a mismatch, not a server fault
        match outcome {
            Ok(matched) => Ok(matched),
            Err(err) => {
                warn!(error = %err, "stored password hash could not be parsed");
                Ok(false)
            }
        }
    }
}
