//! In-memory implementation of PharmacyRepository

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::pharmacy::{Pharmacy, PharmacyDrug, StockChange, StockChangeReason};
use crate::errors::DomainError;

use super::trait_::PharmacyRepository;

#[derive(Default)]
struct PharmacyState {
    pharmacies: HashMap<Uuid, Pharmacy>,
    items: HashMap<Uuid, PharmacyDrug>,
    ledger: Vec<StockChange>,
}

/// In-memory pharmacy repository
#[derive(Clone, Default)]
pub struct InMemoryPharmacyRepository {
    state: Arc<RwLock<PharmacyState>>,
}

impl InMemoryPharmacyRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn by_name(mut pharmacies: Vec<Pharmacy>) -> Vec<Pharmacy> {
    pharmacies.sort_by(|a, b| a.name.cmp(&b.name));
    pharmacies
}

#[async_trait]
impl PharmacyRepository for InMemoryPharmacyRepository {
    async fn find(&self, id: Uuid) -> Result<Option<Pharmacy>, DomainError> {
        Ok(self.state.read().await.pharmacies.get(&id).cloned())
    }

    async fn list_by_manager(&self, manager_id: Uuid) -> Result<Vec<Pharmacy>, DomainError> {
        let state = self.state.read().await;
        Ok(by_name(
            state
                .pharmacies
                .values()
                .filter(|p| p.manager_id == manager_id)
                .cloned()
                .collect(),
        ))
    }

    async fn list_all(&self) -> Result<Vec<Pharmacy>, DomainError> {
        let state = self.state.read().await;
        Ok(by_name(state.pharmacies.values().cloned().collect()))
    }

    async fn save(&self, pharmacy: Pharmacy) -> Result<Pharmacy, DomainError> {
        let mut state = self.state.write().await;
        state.pharmacies.insert(pharmacy.id, pharmacy.clone());
        Ok(pharmacy)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;
        let existed = state.pharmacies.remove(&id).is_some();
        if existed {
            state.items.retain(|_, item| item.pharmacy_id != id);
        }
        Ok(existed)
    }

    async fn find_item(&self, id: Uuid) -> Result<Option<PharmacyDrug>, DomainError> {
        Ok(self.state.read().await.items.get(&id).cloned())
    }

    async fn list_items(&self, pharmacy_id: Uuid) -> Result<Vec<PharmacyDrug>, DomainError> {
        let state = self.state.read().await;
        let mut items: Vec<_> = state
            .items
            .values()
            .filter(|i| i.pharmacy_id == pharmacy_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(items)
    }

    async fn find_item_by_drug(
        &self,
        pharmacy_id: Uuid,
        drug_id: Uuid,
    ) -> Result<Option<PharmacyDrug>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .items
            .values()
            .find(|i| i.pharmacy_id == pharmacy_id && i.drug_id == drug_id)
            .cloned())
    }

    async fn list_items_by_drug(&self, drug_id: Uuid) -> Result<Vec<PharmacyDrug>, DomainError> {
        let state = self.state.read().await;
        Ok(state.items.values().filter(|i| i.drug_id == drug_id).cloned().collect())
    }

    async fn save_item(&self, item: PharmacyDrug) -> Result<PharmacyDrug, DomainError> {
        let mut state = self.state.write().await;
        if state
            .items
            .values()
            .any(|i| i.id != item.id && i.pharmacy_id == item.pharmacy_id && i.drug_id == item.drug_id)
        {
            return Err(DomainError::conflict("Drug is already listed in this pharmacy"));
        }
        state.items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn adjust_stock(
        &self,
        item_id: Uuid,
        delta: i64,
        reason: StockChangeReason,
    ) -> Result<(PharmacyDrug, StockChange), DomainError> {
        let mut state = self.state.write().await;
        let item = state
            .items
            .get_mut(&item_id)
            .ok_or_else(|| DomainError::not_found("pharmacy drug"))?;

        let next = i64::from(item.stock) + delta;
        if next < 0 {
            return Err(DomainError::conflict("Insufficient stock"));
        }
        item.stock = u32::try_from(next).map_err(|_| DomainError::validation("Stock is too large"))?;
        item.updated_at = Utc::now();

        let item = item.clone();
        let change = StockChange::record(&item, delta, reason);
        state.ledger.push(change.clone());
        Ok((item, change))
    }

    async fn list_stock_changes(
        &self,
        pharmacy_ids: Option<&[Uuid]>,
    ) -> Result<Vec<StockChange>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .ledger
            .iter()
            .rev()
            .filter(|c| pharmacy_ids.map_or(true, |ids| ids.contains(&c.pharmacy_id)))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(pharmacy_id: Uuid, drug_id: Uuid, stock: u32) -> PharmacyDrug {
        PharmacyDrug {
            id: Uuid::new_v4(),
            pharmacy_id,
            drug_id,
            price: 12_000,
            stock,
            is_active: true,
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_adjust_stock_records_ledger() {
        let repo = InMemoryPharmacyRepository::new();
        let pharmacy = Uuid::new_v4();
        let saved = repo.save_item(item(pharmacy, Uuid::new_v4(), 5)).await.unwrap();

        let (updated, change) = repo
            .adjust_stock(saved.id, -3, StockChangeReason::Sale)
            .await
            .unwrap();
        assert_eq!(updated.stock, 2);
        assert_eq!(change.delta, -3);
        assert_eq!(change.stock_after, 2);

        let ledger = repo.list_stock_changes(Some(&[pharmacy])).await.unwrap();
        assert_eq!(ledger.len(), 1);
        assert!(repo.list_stock_changes(Some(&[Uuid::new_v4()])).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_adjust_stock_rejects_negative_result() {
        let repo = InMemoryPharmacyRepository::new();
        let saved = repo.save_item(item(Uuid::new_v4(), Uuid::new_v4(), 1)).await.unwrap();

        let err = repo
            .adjust_stock(saved.id, -2, StockChangeReason::Sale)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict { .. }));
        assert_eq!(repo.find_item(saved.id).await.unwrap().unwrap().stock, 1);
        assert!(repo.list_stock_changes(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_drug_listed_once_per_pharmacy() {
        let repo = InMemoryPharmacyRepository::new();
        let pharmacy = Uuid::new_v4();
        let drug = Uuid::new_v4();
        repo.save_item(item(pharmacy, drug, 1)).await.unwrap();
        assert!(repo.save_item(item(pharmacy, drug, 1)).await.is_err());
        assert!(repo.save_item(item(Uuid::new_v4(), drug, 1)).await.is_ok());
    }
}
