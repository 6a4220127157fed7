//! HTTP surface and composition root of the healthcare backend

pub mod app;
pub mod dto;
pub mod handlers;
pub mod lifecycle;
pub mod middleware;
pub mod routes;
pub mod state;

pub use app::create_app;
pub use state::AppState;
