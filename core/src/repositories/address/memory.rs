//! In-memory implementation of AddressRepository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::address::Address;
use crate::errors::DomainError;

use super::trait_::AddressRepository;

#[derive(Clone, Default)]
pub struct InMemoryAddressRepository {
    addresses: Arc<RwLock<HashMap<Uuid, Address>>>,
}

impl InMemoryAddressRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AddressRepository for InMemoryAddressRepository {
    async fn list_by_account(&self, account_id: Uuid) -> Result<Vec<Address>, DomainError> {
        let addresses = self.addresses.read().await;
        let mut list: Vec<_> = addresses
            .values()
            .filter(|a| a.account_id == account_id)
            .cloned()
            .collect();
        list.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(list)
    }

    async fn find(&self, id: Uuid) -> Result<Option<Address>, DomainError> {
        Ok(self.addresses.read().await.get(&id).cloned())
    }

    async fn save(&self, address: Address) -> Result<Address, DomainError> {
        let mut addresses = self.addresses.write().await;
        addresses.insert(address.id, address.clone());
        Ok(address)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.addresses.write().await.remove(&id).is_some())
    }
}
