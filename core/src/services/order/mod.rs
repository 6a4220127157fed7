//! Checkout, payment and fulfilment of orders
//!
//! One checkout produces an order for the payment and one pharmacy order per
//! pharmacy in the cart for the delivery. Stock is taken at checkout and
//! returned when an order or pharmacy order is cancelled.

mod service;
mod shipping;


pub use service::{OrderDetails, OrderService};
pub use shipping::{Shipment, ShippingRates};
