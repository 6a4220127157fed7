//! Cart repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::cart::CartItem;
use crate::errors::DomainError;

#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Items in an account's cart, oldest first
    async fn list_by_account(&self, account_id: Uuid) -> Result<Vec<CartItem>, DomainError>;

    async fn find(&self, id: Uuid) -> Result<Option<CartItem>, DomainError>;

    async fn find_by_pharmacy_drug(
        &self,
        account_id: Uuid,
        pharmacy_drug_id: Uuid,
    ) -> Result<Option<CartItem>, DomainError>;

    /// Insert or replace a cart item
    async fn save(&self, item: CartItem) -> Result<CartItem, DomainError>;

    /// Delete a cart item. Returns whether it existed.
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Remove every item of an account's cart
    async fn clear(&self, account_id: Uuid) -> Result<(), DomainError>;
}
