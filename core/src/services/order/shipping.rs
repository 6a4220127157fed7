//! Shipping cost port

use async_trait::async_trait;

use crate::errors::DomainError;

/// One parcel from a pharmacy to the buyer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shipment {
    pub origin_city: String,
    pub destination_city: String,
    pub weight_grams: u64,
}

/// Prices a shipment in the smallest currency unit
#[async_trait]
pub trait ShippingRates: Send + Sync {
    async fn cost(&self, shipment: &Shipment) -> Result<i64, DomainError>;
}
