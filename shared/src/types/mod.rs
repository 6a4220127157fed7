//! Type definitions shared by the HTTP layer and the services
//!
//! - `pagination` - Pagination for list endpoints
//! - `response` - Success response wrapper

pub mod pagination;
pub mod response;

pub use pagination::{PaginatedResponse, Pagination};
pub use response::ApiResponse;
