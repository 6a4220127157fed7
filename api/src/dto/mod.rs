//! Request and response bodies of the HTTP surface

pub mod address;
pub mod auth;
pub mod catalog;
pub mod chat;
pub mod order;
pub mod partner;
pub mod pharmacy;
pub mod profile;

pub use hc_shared::errors::ErrorResponse;
pub use hc_shared::types::{ApiResponse, PaginatedResponse, Pagination};
