use hc_core::services::{InventoryUpdate, NewInventoryItem, PharmacyInput, StockMutation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PharmacyRequest {
    #[validate(length(min = 1, max = 150))]
    pub name: String,

    #[validate(length(min = 1, max = 255))]
    pub address: String,

    #[validate(length(min = 1, max = 100))]
    pub city: String,

    #[validate(length(min = 1, max = 100))]
    pub pharmacist_name: String,

    /// Pharmacist license (SIPA) number
    #[validate(length(min = 1, max = 64))]
    pub license_number: String,

    /// Free-form, e.g. "Mon-Fri 08:00-21:00"
    #[validate(length(min = 1, max = 100))]
    pub operational_hours: String,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl From<PharmacyRequest> for PharmacyInput {
    fn from(req: PharmacyRequest) -> Self {
        Self {
            name: req.name,
            address: req.address,
            city: req.city,
            pharmacist_name: req.pharmacist_name,
            license_number: req.license_number,
            operational_hours: req.operational_hours,
            is_active: req.is_active,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct InventoryItemRequest {
    pub drug_id: Uuid,

    #[validate(range(min = 0))]
    pub price: i64,

    pub stock: u32,
}

impl From<InventoryItemRequest> for NewInventoryItem {
    fn from(req: InventoryItemRequest) -> Self {
        Self {
            drug_id: req.drug_id,
            price: req.price,
            stock: req.stock,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct InventoryUpdateRequest {
    #[validate(range(min = 0))]
    pub price: Option<i64>,
    pub stock: Option<u32>,
    pub is_active: Option<bool>,
}

impl From<InventoryUpdateRequest> for InventoryUpdate {
    fn from(req: InventoryUpdateRequest) -> Self {
        Self {
            price: req.price,
            stock: req.stock,
            is_active: req.is_active,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StockMutationRequest {
    pub from_pharmacy_id: Uuid,
    pub to_pharmacy_id: Uuid,
    pub drug_id: Uuid,

    #[validate(range(min = 1))]
    pub quantity: u32,
}

impl From<StockMutationRequest> for StockMutation {
    fn from(req: StockMutationRequest) -> Self {
        Self {
            from_pharmacy_id: req.from_pharmacy_id,
            to_pharmacy_id: req.to_pharmacy_id,
            drug_id: req.drug_id,
            quantity: req.quantity,
        }
    }
}

/// Optional `pharmacy_id` filter of the report endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportQuery {
    pub pharmacy_id: Option<Uuid>,
}
