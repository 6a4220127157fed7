//! Shared utilities and common types for the healthcare backend
//!
//! This crate provides functionality used across all server crates:
//! - Settings loaded from the process environment
//! - Error response structure and error codes
//! - Pagination and response wrappers

pub mod config;
pub mod errors;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{ConfigError, EmailSettings, ServerSettings, Settings, SigningSecrets};
pub use errors::{error_codes, ErrorResponse};
pub use types::{ApiResponse, PaginatedResponse, Pagination};
