//! Telemedicine consultations
//!
//! Rooms pair one user with one doctor. Messages are delivered over HTTP
//! long-poll: a listener asks for everything after the last sequence number
//! it has seen and is parked until a message arrives, the room closes, or
//! the wait times out.

mod service;
mod signals;


pub use service::{ListenBatch, TelemedicineService, DEFAULT_LISTEN_TIMEOUT};
