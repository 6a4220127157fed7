//! Shipping address entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user's shipping address. At most one address per account is the main one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub id: Uuid,
    pub account_id: Uuid,
    /// Free-form label such as "Home" or "Office"
    pub label: String,
    pub recipient: String,
    pub phone: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub postal_code: String,
    pub is_main: bool,
    pub created_at: DateTime<Utc>,
}
