pub mod auth;
pub mod catch_panic;
pub mod cors;
pub mod error_handler;
pub mod in_flight;
pub mod request_id;
pub mod role;

pub use auth::*;
pub use catch_panic::*;
pub use cors::*;
pub use error_handler::*;
pub use in_flight::*;
pub use request_id::*;
pub use role::*;
