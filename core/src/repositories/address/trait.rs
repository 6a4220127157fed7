//! Address repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::address::Address;
use crate::errors::DomainError;

#[async_trait]
pub trait AddressRepository: Send + Sync {
    /// Addresses of one account, oldest first
    async fn list_by_account(&self, account_id: Uuid) -> Result<Vec<Address>, DomainError>;

    async fn find(&self, id: Uuid) -> Result<Option<Address>, DomainError>;

    /// Insert or replace an address
    async fn save(&self, address: Address) -> Result<Address, DomainError>;

    /// Delete an address. Returns whether it existed.
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
