//! In-memory implementation of CartRepository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::cart::CartItem;
use crate::errors::DomainError;

use super::trait_::CartRepository;

#[derive(Clone, Default)]
pub struct InMemoryCartRepository {
    items: Arc<RwLock<HashMap<Uuid, CartItem>>>,
}

impl InMemoryCartRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CartRepository for InMemoryCartRepository {
    async fn list_by_account(&self, account_id: Uuid) -> Result<Vec<CartItem>, DomainError> {
        let items = self.items.read().await;
        let mut list: Vec<_> = items
            .values()
            .filter(|i| i.account_id == account_id)
            .cloned()
            .collect();
        list.sort_by(|a, b| a.added_at.cmp(&b.added_at));
        Ok(list)
    }

    async fn find(&self, id: Uuid) -> Result<Option<CartItem>, DomainError> {
        Ok(self.items.read().await.get(&id).cloned())
    }

    async fn find_by_pharmacy_drug(
        &self,
        account_id: Uuid,
        pharmacy_drug_id: Uuid,
    ) -> Result<Option<CartItem>, DomainError> {
        let items = self.items.read().await;
        Ok(items
            .values()
            .find(|i| i.account_id == account_id && i.pharmacy_drug_id == pharmacy_drug_id)
            .cloned())
    }

    async fn save(&self, item: CartItem) -> Result<CartItem, DomainError> {
        self.items.write().await.insert(item.id, item.clone());
        Ok(item)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.items.write().await.remove(&id).is_some())
    }

    async fn clear(&self, account_id: Uuid) -> Result<(), DomainError> {
        self.items.write().await.retain(|_, i| i.account_id != account_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_clear_only_touches_one_account() {
        let repo = InMemoryCartRepository::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        repo.save(CartItem::new(alice, Uuid::new_v4(), 1)).await.unwrap();
        repo.save(CartItem::new(alice, Uuid::new_v4(), 2)).await.unwrap();
        repo.save(CartItem::new(bob, Uuid::new_v4(), 1)).await.unwrap();

        repo.clear(alice).await.unwrap();
        assert!(repo.list_by_account(alice).await.unwrap().is_empty());
        assert_eq!(repo.list_by_account(bob).await.unwrap().len(), 1);
    }
}
