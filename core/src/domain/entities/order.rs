//! Order entities and their status transitions.
//!
//! A checkout produces one [`Order`] carrying the payment state and one
//! [`PharmacyOrder`] per pharmacy carrying the fulfilment state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payment state of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    WaitingPayment,
    /// Payment proof uploaded, waiting for an admin
    WaitingConfirmation,
    Paid,
    Cancelled,
}

impl OrderStatus {
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;

        matches!(
            (self, next),
            (WaitingPayment, WaitingConfirmation)
                | (WaitingConfirmation, Paid)
                | (WaitingPayment, Cancelled)
                | (WaitingConfirmation, Cancelled)
        )
    }
}

/// Fulfilment state of the part of an order served by one pharmacy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PharmacyOrderStatus {
    WaitingPayment,
    Processing,
    Sent,
    Delivered,
    Cancelled,
}

impl PharmacyOrderStatus {
    pub fn can_transition_to(self, next: PharmacyOrderStatus) -> bool {
        use PharmacyOrderStatus::*;

        matches!(
            (self, next),
            (WaitingPayment, Processing)
                | (WaitingPayment, Cancelled)
                | (Processing, Sent)
                | (Processing, Cancelled)
                | (Sent, Delivered)
        )
    }

    /// Whether the items of this order count as sold
    pub fn counts_as_sale(self) -> bool {
        matches!(
            self,
            PharmacyOrderStatus::Processing | PharmacyOrderStatus::Sent | PharmacyOrderStatus::Delivered
        )
    }
}

/// Copy of the destination address taken at checkout time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub recipient: String,
    pub phone: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub postal_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub account_id: Uuid,
    pub shipping_address: ShippingAddress,
    pub status: OrderStatus,
    /// Reference to the uploaded transfer receipt
    pub payment_proof: Option<String>,
    pub items_total: i64,
    pub shipping_total: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn grand_total(&self) -> i64 {
        self.items_total + self.shipping_total
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub pharmacy_drug_id: Uuid,
    pub drug_id: Uuid,
    pub name: String,
    /// Unit price at checkout time
    pub price: i64,
    pub quantity: u32,
}

impl OrderItem {
    pub fn subtotal(&self) -> i64 {
        self.price * i64::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PharmacyOrder {
    pub id: Uuid,
    pub order_id: Uuid,
    pub account_id: Uuid,
    pub pharmacy_id: Uuid,
    pub items: Vec<OrderItem>,
    pub shipping_cost: i64,
    pub status: PharmacyOrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PharmacyOrder {
    pub fn items_total(&self) -> i64 {
        self.items.iter().map(OrderItem::subtotal).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_transitions() {
        use OrderStatus::*;
        assert!(WaitingPayment.can_transition_to(WaitingConfirmation));
        assert!(WaitingConfirmation.can_transition_to(Paid));
        assert!(!WaitingPayment.can_transition_to(Paid));
        assert!(!Paid.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(WaitingPayment));
    }

    #[test]
    fn test_pharmacy_order_transitions() {
        use PharmacyOrderStatus::*;
        assert!(Processing.can_transition_to(Sent));
        assert!(Sent.can_transition_to(Delivered));
        assert!(!Sent.can_transition_to(Cancelled));
        assert!(!WaitingPayment.can_transition_to(Sent));
        assert!(Delivered.counts_as_sale());
        assert!(!Cancelled.counts_as_sale());
    }
}
