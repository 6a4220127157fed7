//! Pharmacy management for partners: outlets, inventory and stock movements

use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::pharmacy::{Pharmacy, PharmacyDrug, StockChange, StockChangeReason};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{CatalogRepository, PharmacyRepository};

#[derive(Debug, Clone)]
pub struct PharmacyInput {
    pub name: String,
    pub address: String,
    pub city: String,
    pub pharmacist_name: String,
    pub license_number: String,
    pub operational_hours: String,
    pub is_active: bool,
}

impl PharmacyInput {
    fn validate(&self) -> DomainResult<()> {
        for (value, name) in [
            (&self.name, "Name"),
            (&self.address, "Address"),
            (&self.city, "City"),
            (&self.pharmacist_name, "Pharmacist name"),
            (&self.license_number, "License number"),
        ] {
            if value.trim().is_empty() {
                return Err(DomainError::validation(format!("{name} is required")));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct NewInventoryItem {
    pub drug_id: Uuid,
    pub price: i64,
    pub stock: u32,
}

/// Partial inventory update. A new `stock` is recorded as a manual change.
#[derive(Debug, Clone, Default)]
pub struct InventoryUpdate {
    pub price: Option<i64>,
    pub stock: Option<u32>,
    pub is_active: Option<bool>,
}

/// Move stock of one drug between two pharmacies of the same manager
#[derive(Debug, Clone)]
pub struct StockMutation {
    pub from_pharmacy_id: Uuid,
    pub to_pharmacy_id: Uuid,
    pub drug_id: Uuid,
    pub quantity: u32,
}

/// An inventory row with the drug name resolved
#[derive(Debug, Clone, Serialize)]
pub struct InventoryEntry {
    #[serde(flatten)]
    pub item: PharmacyDrug,
    pub drug_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MutationReceipt {
    pub outgoing: StockChange,
    pub incoming: StockChange,
}

pub struct PharmacyService {
    pharmacies: Arc<dyn PharmacyRepository>,
    catalog: Arc<dyn CatalogRepository>,
}

fn validate_price(price: i64) -> DomainResult<()> {
    if price <= 0 {
        return Err(DomainError::validation("Price must be positive"));
    }
    Ok(())
}

impl PharmacyService {
    pub fn new(pharmacies: Arc<dyn PharmacyRepository>, catalog: Arc<dyn CatalogRepository>) -> Self {
        Self { pharmacies, catalog }
    }

    /// The pharmacy if it belongs to the manager
    pub async fn owned(&self, manager_id: Uuid, pharmacy_id: Uuid) -> DomainResult<Pharmacy> {
        let pharmacy = self
            .pharmacies
            .find(pharmacy_id)
            .await?
            .ok_or_else(|| DomainError::not_found("pharmacy"))?;
        if pharmacy.manager_id != manager_id {
            return Err(DomainError::forbidden("Pharmacy belongs to another partner"));
        }
        Ok(pharmacy)
    }

    pub async fn list_mine(&self, manager_id: Uuid) -> DomainResult<Vec<Pharmacy>> {
        self.pharmacies.list_by_manager(manager_id).await
    }

    pub async fn list_all(&self) -> DomainResult<Vec<Pharmacy>> {
        self.pharmacies.list_all().await
    }

    pub async fn create(&self, manager_id: Uuid, input: PharmacyInput) -> DomainResult<Pharmacy> {
        input.validate()?;
        let now = Utc::now();
        let pharmacy = Pharmacy {
            id: Uuid::new_v4(),
            manager_id,
            name: input.name.trim().to_string(),
            address: input.address.trim().to_string(),
            city: input.city.trim().to_string(),
            pharmacist_name: input.pharmacist_name.trim().to_string(),
            license_number: input.license_number.trim().to_string(),
            operational_hours: input.operational_hours.trim().to_string(),
            is_active: input.is_active,
            created_at: now,
            updated_at: now,
        };
        let pharmacy = self.pharmacies.save(pharmacy).await?;
        tracing::info!(pharmacy_id = %pharmacy.id, manager_id = %manager_id, "pharmacy created");
        Ok(pharmacy)
    }

    pub async fn get(&self, manager_id: Uuid, pharmacy_id: Uuid) -> DomainResult<Pharmacy> {
        self.owned(manager_id, pharmacy_id).await
    }

    pub async fn update(&self, manager_id: Uuid, pharmacy_id: Uuid, input: PharmacyInput) -> DomainResult<Pharmacy> {
        input.validate()?;
        let mut pharmacy = self.owned(manager_id, pharmacy_id).await?;
        pharmacy.name = input.name.trim().to_string();
        pharmacy.address = input.address.trim().to_string();
        pharmacy.city = input.city.trim().to_string();
        pharmacy.pharmacist_name = input.pharmacist_name.trim().to_string();
        pharmacy.license_number = input.license_number.trim().to_string();
        pharmacy.operational_hours = input.operational_hours.trim().to_string();
        pharmacy.is_active = input.is_active;
        pharmacy.updated_at = Utc::now();
        self.pharmacies.save(pharmacy).await
    }

    pub async fn delete(&self, manager_id: Uuid, pharmacy_id: Uuid) -> DomainResult<()> {
        self.owned(manager_id, pharmacy_id).await?;
        self.pharmacies.delete(pharmacy_id).await?;
        tracing::info!(pharmacy_id = %pharmacy_id, "pharmacy deleted");
        Ok(())
    }

    pub async fn list_inventory(&self, manager_id: Uuid, pharmacy_id: Uuid) -> DomainResult<Vec<InventoryEntry>> {
        self.owned(manager_id, pharmacy_id).await?;

        let mut entries = Vec::new();
        for item in self.pharmacies.list_items(pharmacy_id).await? {
            let drug_name = self
                .catalog
                .find_drug(item.drug_id)
                .await?
                .map(|d| d.name)
                .unwrap_or_default();
            entries.push(InventoryEntry { item, drug_name });
        }
        Ok(entries)
    }

    /// List a catalog drug in a pharmacy. Initial stock enters the ledger
    /// as a manual change.
    pub async fn add_drug(
        &self,
        manager_id: Uuid,
        pharmacy_id: Uuid,
        input: NewInventoryItem,
    ) -> DomainResult<PharmacyDrug> {
        self.owned(manager_id, pharmacy_id).await?;
        validate_price(input.price)?;
        match self.catalog.find_drug(input.drug_id).await? {
            Some(drug) if drug.is_active => {}
            _ => return Err(DomainError::validation("Unknown drug")),
        }

        let item = self
            .pharmacies
            .save_item(PharmacyDrug {
                id: Uuid::new_v4(),
                pharmacy_id,
                drug_id: input.drug_id,
                price: input.price,
                stock: 0,
                is_active: true,
                updated_at: Utc::now(),
            })
            .await?;

        if input.stock == 0 {
            return Ok(item);
        }
        let (item, _) = self
            .pharmacies
            .adjust_stock(item.id, i64::from(input.stock), StockChangeReason::Manual)
            .await?;
        Ok(item)
    }

    pub async fn update_drug(
        &self,
        manager_id: Uuid,
        pharmacy_id: Uuid,
        item_id: Uuid,
        update: InventoryUpdate,
    ) -> DomainResult<PharmacyDrug> {
        self.owned(manager_id, pharmacy_id).await?;
        let mut item = match self.pharmacies.find_item(item_id).await? {
            Some(item) if item.pharmacy_id == pharmacy_id => item,
            _ => return Err(DomainError::not_found("pharmacy drug")),
        };

        if let Some(price) = update.price {
            validate_price(price)?;
            item.price = price;
        }
        if let Some(is_active) = update.is_active {
            item.is_active = is_active;
        }
        item.updated_at = Utc::now();
        let mut item = self.pharmacies.save_item(item).await?;

        if let Some(stock) = update.stock {
            let delta = i64::from(stock) - i64::from(item.stock);
            if delta != 0 {
                item = self
                    .pharmacies
                    .adjust_stock(item.id, delta, StockChangeReason::Manual)
                    .await?
                    .0;
            }
        }
        Ok(item)
    }

    /// Ledger entries of the manager's pharmacies, newest first
    pub async fn stock_changes(&self, manager_id: Uuid) -> DomainResult<Vec<StockChange>> {
        let ids: Vec<Uuid> = self
            .pharmacies
            .list_by_manager(manager_id)
            .await?
            .into_iter()
            .map(|p| p.id)
            .collect();
        self.pharmacies.list_stock_changes(Some(&ids)).await
    }

    pub async fn all_stock_changes(&self) -> DomainResult<Vec<StockChange>> {
        self.pharmacies.list_stock_changes(None).await
    }

    pub async fn mutate_stock(&self, manager_id: Uuid, mutation: StockMutation) -> DomainResult<MutationReceipt> {
        if mutation.quantity == 0 {
            return Err(DomainError::validation("Quantity must be at least 1"));
        }
        if mutation.from_pharmacy_id == mutation.to_pharmacy_id {
            return Err(DomainError::validation("Source and destination must differ"));
        }
        self.owned(manager_id, mutation.from_pharmacy_id).await?;
        self.owned(manager_id, mutation.to_pharmacy_id).await?;

        let source = self
            .pharmacies
            .find_item_by_drug(mutation.from_pharmacy_id, mutation.drug_id)
            .await?
            .ok_or_else(|| DomainError::validation("Source pharmacy does not stock this drug"))?;
        let destination = self
            .pharmacies
            .find_item_by_drug(mutation.to_pharmacy_id, mutation.drug_id)
            .await?
            .ok_or_else(|| DomainError::validation("Destination pharmacy does not list this drug"))?;

        let quantity = i64::from(mutation.quantity);
        let (_, outgoing) = self
            .pharmacies
            .adjust_stock(source.id, -quantity, StockChangeReason::MutationOut)
            .await?;

        match self
            .pharmacies
            .adjust_stock(destination.id, quantity, StockChangeReason::MutationIn)
            .await
        {
            Ok((_, incoming)) => {
                tracing::info!(
                    from = %mutation.from_pharmacy_id,
                    to = %mutation.to_pharmacy_id,
                    drug_id = %mutation.drug_id,
                    quantity,
                    "stock mutated"
                );
                Ok(MutationReceipt { outgoing, incoming })
            }
            Err(e) => {
                // Put the stock back where it came from
                if let Err(undo) = self
                    .pharmacies
                    .adjust_stock(source.id, quantity, StockChangeReason::MutationIn)
                    .await
                {
                    tracing::error!(item_id = %source.id, error = %undo, "failed to roll back stock mutation");
                }
                Err(e)
            }
        }
    }
}
