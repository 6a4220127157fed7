//! Shopping cart entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: Uuid,
    pub account_id: Uuid,
    pub pharmacy_drug_id: Uuid,
    pub quantity: u32,
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    pub fn new(account_id: Uuid, pharmacy_drug_id: Uuid, quantity: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            pharmacy_drug_id,
            quantity,
            added_at: Utc::now(),
        }
    }
}
