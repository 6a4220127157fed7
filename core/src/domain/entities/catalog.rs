//! Drug catalog entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self { id: Uuid::new_v4(), name: name.into() }
    }
}

/// Physical form of a drug (tablet, syrup, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrugForm {
    pub id: Uuid,
    pub name: String,
}

impl DrugForm {
    pub fn new(name: impl Into<String>) -> Self {
        Self { id: Uuid::new_v4(), name: name.into() }
    }
}

/// Regulatory classification of a drug
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrugClassification {
    pub id: Uuid,
    pub name: String,
    /// Whether buying a drug of this class needs a doctor's prescription
    pub requires_prescription: bool,
}

impl DrugClassification {
    pub fn new(name: impl Into<String>, requires_prescription: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            requires_prescription,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drug {
    pub id: Uuid,
    pub name: String,
    pub generic_name: String,
    pub manufacturer: String,
    pub description: String,
    pub category_id: Uuid,
    pub form_id: Uuid,
    pub classification_id: Uuid,
    /// Human readable pack content, e.g. "10 tablets"
    pub unit_in_pack: String,
    /// Shipping weight of one selling unit in grams
    pub weight_grams: u32,
    /// Deleted drugs are deactivated, not removed
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
