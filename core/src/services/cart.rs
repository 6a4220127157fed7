//! Shopping cart of a user

use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::cart::CartItem;
use crate::domain::entities::pharmacy::PharmacyDrug;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{CartRepository, CatalogRepository, PharmacyRepository};
use crate::services::telemedicine::TelemedicineService;

/// One cart row with current price and names resolved
#[derive(Debug, Clone, Serialize)]
pub struct CartLine {
    pub id: Uuid,
    pub pharmacy_drug_id: Uuid,
    pub pharmacy_id: Uuid,
    pub pharmacy_name: String,
    pub drug_id: Uuid,
    pub drug_name: String,
    pub price: i64,
    pub quantity: u32,
    pub subtotal: i64,
    /// Stock currently available at the pharmacy
    pub available: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartLine>,
    pub total: i64,
}

pub struct CartService {
    carts: Arc<dyn CartRepository>,
    pharmacies: Arc<dyn PharmacyRepository>,
    catalog: Arc<dyn CatalogRepository>,
    telemedicine: Arc<TelemedicineService>,
}

impl CartService {
    pub fn new(
        carts: Arc<dyn CartRepository>,
        pharmacies: Arc<dyn PharmacyRepository>,
        catalog: Arc<dyn CatalogRepository>,
        telemedicine: Arc<TelemedicineService>,
    ) -> Self {
        Self {
            carts,
            pharmacies,
            catalog,
            telemedicine,
        }
    }

    pub async fn view(&self, user_id: Uuid) -> DomainResult<CartView> {
        let mut items = Vec::new();
        for item in self.carts.list_by_account(user_id).await? {
            let Some(offer) = self.pharmacies.find_item(item.pharmacy_drug_id).await? else {
                continue;
            };
            let pharmacy_name = self
                .pharmacies
                .find(offer.pharmacy_id)
                .await?
                .map(|p| p.name)
                .unwrap_or_default();
            let drug_name = self
                .catalog
                .find_drug(offer.drug_id)
                .await?
                .map(|d| d.name)
                .unwrap_or_default();
            items.push(CartLine {
                id: item.id,
                pharmacy_drug_id: offer.id,
                pharmacy_id: offer.pharmacy_id,
                pharmacy_name,
                drug_id: offer.drug_id,
                drug_name,
                price: offer.price,
                quantity: item.quantity,
                subtotal: offer.price * i64::from(item.quantity),
                available: offer.stock,
            });
        }
        let total = items.iter().map(|line| line.subtotal).sum();
        Ok(CartView { items, total })
    }

    /// Check that `quantity` units of an offer may go in the user's cart
    async fn check_purchasable(&self, user_id: Uuid, offer: &PharmacyDrug, quantity: u32) -> DomainResult<()> {
        if quantity == 0 {
            return Err(DomainError::validation("Quantity must be at least 1"));
        }
        if !offer.is_active {
            return Err(DomainError::validation("This drug is not sold by the pharmacy"));
        }
        if quantity > offer.stock {
            return Err(DomainError::conflict(format!("Only {} left in stock", offer.stock)));
        }

        let drug = match self.catalog.find_drug(offer.drug_id).await? {
            Some(drug) if drug.is_active => drug,
            _ => return Err(DomainError::validation("This drug is no longer sold")),
        };
        let needs_prescription = self
            .catalog
            .find_classification(drug.classification_id)
            .await?
            .is_some_and(|c| c.requires_prescription);
        if needs_prescription && !self.telemedicine.has_prescription(user_id, drug.id).await? {
            return Err(DomainError::forbidden("This drug requires a doctor's prescription"));
        }
        Ok(())
    }

    async fn offer(&self, pharmacy_drug_id: Uuid) -> DomainResult<PharmacyDrug> {
        self.pharmacies
            .find_item(pharmacy_drug_id)
            .await?
            .ok_or_else(|| DomainError::not_found("pharmacy drug"))
    }

    /// Add units of an offer. Adding an offer already in the cart increases
    /// its quantity.
    pub async fn add(&self, user_id: Uuid, pharmacy_drug_id: Uuid, quantity: u32) -> DomainResult<CartItem> {
        if quantity == 0 {
            return Err(DomainError::validation("Quantity must be at least 1"));
        }
        let offer = self.offer(pharmacy_drug_id).await?;

        match self.carts.find_by_pharmacy_drug(user_id, pharmacy_drug_id).await? {
            Some(mut item) => {
                let total = item.quantity.saturating_add(quantity);
                self.check_purchasable(user_id, &offer, total).await?;
                item.quantity = total;
                self.carts.save(item).await
            }
            None => {
                self.check_purchasable(user_id, &offer, quantity).await?;
                self.carts.save(CartItem::new(user_id, pharmacy_drug_id, quantity)).await
            }
        }
    }

    async fn owned(&self, user_id: Uuid, item_id: Uuid) -> DomainResult<CartItem> {
        match self.carts.find(item_id).await? {
            Some(item) if item.account_id == user_id => Ok(item),
            _ => Err(DomainError::not_found("cart item")),
        }
    }

    pub async fn update(&self, user_id: Uuid, item_id: Uuid, quantity: u32) -> DomainResult<CartItem> {
        let mut item = self.owned(user_id, item_id).await?;
        let offer = self.offer(item.pharmacy_drug_id).await?;
        self.check_purchasable(user_id, &offer, quantity).await?;
        item.quantity = quantity;
        self.carts.save(item).await
    }

    pub async fn remove(&self, user_id: Uuid, item_id: Uuid) -> DomainResult<()> {
        self.owned(user_id, item_id).await?;
        self.carts.delete(item_id).await?;
        Ok(())
    }
}
