//! Flat-rate implementation of the core `ShippingRates` port

use async_trait::async_trait;
use hc_core::errors::DomainError;
use hc_core::services::order::{Shipment, ShippingRates};
use tracing::debug;

/// Tariff in the smallest currency unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tariff {
    pub base: i64,
    /// Charged per started kilogram
    pub per_kg: i64,
}

/// Base plus per-kilogram pricing with a cheaper tariff inside one city
#[derive(Clone)]
pub struct FlatRateShipping {
    /// Key for the courier API. Carried for parity with a live adapter only.
    api_key: String,
    same_city: Tariff,
    inter_city: Tariff,
}

impl FlatRateShipping {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            same_city: Tariff { base: 5_000, per_kg: 2_000 },
            inter_city: Tariff { base: 10_000, per_kg: 5_000 },
        }
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Price a shipment without going through the async port
    pub fn quote(&self, shipment: &Shipment) -> i64 {
        let tariff = if same_city(&shipment.origin_city, &shipment.destination_city) {
            self.same_city
        } else {
            self.inter_city
        };

        // Parcels under one kilogram are billed as one
        let kilograms = shipment.weight_grams.div_ceil(1_000).max(1);
        let kilograms = i64::try_from(kilograms).unwrap_or(i64::MAX);
        tariff
            .base
            .saturating_add(tariff.per_kg.saturating_mul(kilograms))
    }
}

impl std::fmt::Debug for FlatRateShipping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlatRateShipping")
            .field("api_key", &"<redacted>")
            .field("same_city", &self.same_city)
            .field("inter_city", &self.inter_city)
            .finish()
    }
}

fn same_city(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

#[async_trait]
impl ShippingRates for FlatRateShipping {
    async fn cost(&self, shipment: &Shipment) -> Result<i64, DomainError> {
        if shipment.destination_city.trim().is_empty() {
            return Err(DomainError::validation("shipping destination city is required"));
        }

        let cost = self.quote(shipment);
        debug!(
            origin = %shipment.origin_city,
            destination = %shipment.destination_city,
            weight_grams = shipment.weight_grams,
            cost,
            "shipping quoted"
        );
        Ok(cost)
    }
}
