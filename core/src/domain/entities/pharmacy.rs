//! Pharmacy, inventory and stock ledger entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pharmacy {
    pub id: Uuid,
    /// Pharmacy-manager account owning this pharmacy
    pub manager_id: Uuid,
    pub name: String,
    pub address: String,
    pub city: String,
    pub pharmacist_name: String,
    pub license_number: String,
    pub operational_hours: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A drug offered by one pharmacy at its own price and stock level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PharmacyDrug {
    pub id: Uuid,
    pub pharmacy_id: Uuid,
    pub drug_id: Uuid,
    /// Unit price in the smallest currency unit
    pub price: i64,
    pub stock: u32,
    pub is_active: bool,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockChangeReason {
    /// Stock set by the manager
    Manual,
    /// Stock reserved by a checkout
    Sale,
    /// Stock received from another pharmacy of the same manager
    MutationIn,
    /// Stock sent to another pharmacy of the same manager
    MutationOut,
    /// Stock returned by a cancelled order
    Cancellation,
}

/// One entry of the stock ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockChange {
    pub id: Uuid,
    pub pharmacy_id: Uuid,
    pub pharmacy_drug_id: Uuid,
    pub drug_id: Uuid,
    pub delta: i64,
    /// Stock level after the change
    pub stock_after: u32,
    pub reason: StockChangeReason,
    pub created_at: DateTime<Utc>,
}

impl StockChange {
    pub fn record(item: &PharmacyDrug, delta: i64, reason: StockChangeReason) -> Self {
        Self {
            id: Uuid::new_v4(),
            pharmacy_id: item.pharmacy_id,
            pharmacy_drug_id: item.id,
            drug_id: item.drug_id,
            delta,
            stock_after: item.stock,
            reason,
            created_at: Utc::now(),
        }
    }
}
