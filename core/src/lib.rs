//! # Healthcare Core
//!
//! Core business logic and domain layer for the healthcare backend.
//! This crate contains domain entities, repository ports with in-memory
//! implementations, and the use-case services the HTTP layer calls into.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
