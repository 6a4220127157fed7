use hc_core::{OrderStatus, PharmacyOrderStatus};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CartItemRequest {
    pub pharmacy_drug_id: Uuid,

    #[validate(range(min = 1, max = 1000))]
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CartQuantityRequest {
    #[validate(range(min = 1, max = 1000))]
    pub quantity: u32,
}

/// Body of `POST /orders`: check out the whole cart to one address
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub address_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PaymentProofRequest {
    /// Location of the uploaded transfer receipt
    #[validate(url)]
    pub proof_url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderStatusQuery {
    pub status: Option<OrderStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PharmacyOrderStatusQuery {
    pub status: Option<PharmacyOrderStatus>,
}
