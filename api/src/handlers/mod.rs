//! Request handlers, one module per route area
//!
//! Handlers stay thin: extract, validate, call one service, wrap the result.

pub mod admin;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod chat;
pub mod doctors;
pub mod error;
pub mod managers;
pub mod orders;
pub mod pprof;
pub mod response;
pub mod system;
pub mod users;

pub use error::ApiError;
pub use response::ApiResult;
