//! Pharmacy repository trait covering pharmacies, their inventory and the
//! stock ledger.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::pharmacy::{Pharmacy, PharmacyDrug, StockChange, StockChangeReason};
use crate::errors::DomainError;

/// Repository trait for pharmacies and inventory
///
/// Stock levels only change through [`PharmacyRepository::adjust_stock`],
/// which applies the delta and appends the ledger entry in one step.
#[async_trait]
pub trait PharmacyRepository: Send + Sync {
    async fn find(&self, id: Uuid) -> Result<Option<Pharmacy>, DomainError>;

    /// Pharmacies owned by a manager, ordered by name
    async fn list_by_manager(&self, manager_id: Uuid) -> Result<Vec<Pharmacy>, DomainError>;

    /// All pharmacies, ordered by name
    async fn list_all(&self) -> Result<Vec<Pharmacy>, DomainError>;

    /// Insert or replace a pharmacy
    async fn save(&self, pharmacy: Pharmacy) -> Result<Pharmacy, DomainError>;

    /// Delete a pharmacy together with its inventory. Returns whether it existed.
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    async fn find_item(&self, id: Uuid) -> Result<Option<PharmacyDrug>, DomainError>;

    /// Inventory of one pharmacy
    async fn list_items(&self, pharmacy_id: Uuid) -> Result<Vec<PharmacyDrug>, DomainError>;

    async fn find_item_by_drug(
        &self,
        pharmacy_id: Uuid,
        drug_id: Uuid,
    ) -> Result<Option<PharmacyDrug>, DomainError>;

    /// Every pharmacy offer of a drug
    async fn list_items_by_drug(&self, drug_id: Uuid) -> Result<Vec<PharmacyDrug>, DomainError>;

    /// Insert or replace an inventory entry. A pharmacy lists a drug at most once.
    async fn save_item(&self, item: PharmacyDrug) -> Result<PharmacyDrug, DomainError>;

    /// Apply a signed delta to an item's stock and record it in the ledger.
    ///
    /// Fails with `Conflict` when the resulting stock would be negative, in
    /// which case nothing changes.
    async fn adjust_stock(
        &self,
        item_id: Uuid,
        delta: i64,
        reason: StockChangeReason,
    ) -> Result<(PharmacyDrug, StockChange), DomainError>;

    /// Ledger entries, newest first, optionally restricted to some pharmacies
    async fn list_stock_changes(
        &self,
        pharmacy_ids: Option<&[Uuid]>,
    ) -> Result<Vec<StockChange>, DomainError>;
}
