//! Token service module for JWT management
//!
//! Issues and verifies HS256 tokens for the four token purposes. Each purpose
//! signs with its own secret and carries its purpose in the claims, so a
//! token only verifies under the purpose it was issued for.

mod config;
mod service;


pub use config::TokenServiceConfig;
pub use service::TokenService;
