//! Account repository trait defining the interface for account persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::errors::DomainError;

/// Repository trait for Account entity persistence operations
///
/// E-mail addresses are unique across accounts; implementations must reject
/// a `create` whose normalized e-mail is already taken with
/// `DomainError::Conflict`.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account by its unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError>;

    /// Find an account by its normalized e-mail address
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;

    /// Create a new account
    async fn create(&self, account: Account) -> Result<Account, DomainError>;

    /// Update an existing account
    async fn update(&self, account: Account) -> Result<Account, DomainError>;

    /// Delete an account. Returns whether it existed.
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
