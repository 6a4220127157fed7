//! Repository ports and their in-memory implementations.
//!
//! Each sub-module defines an async trait in `trait.rs` and an in-memory
//! implementation in `memory.rs` backed by `tokio::sync::RwLock`. The HTTP
//! layer wires the in-memory implementations; SQL-backed implementations
//! plug in behind the same traits.

pub mod account;
pub mod address;
pub mod cart;
pub mod catalog;
pub mod chat;
pub mod order;
pub mod pharmacy;
pub mod profile;

pub use account::{AccountRepository, InMemoryAccountRepository};
pub use address::{AddressRepository, InMemoryAddressRepository};
pub use cart::{CartRepository, InMemoryCartRepository};
pub use catalog::{CatalogRepository, DrugFilter, InMemoryCatalogRepository};
pub use chat::{ChatRepository, InMemoryChatRepository, NewMessage};
pub use order::{InMemoryOrderRepository, OrderRepository};
pub use pharmacy::{InMemoryPharmacyRepository, PharmacyRepository};
pub use profile::{
    InMemoryPartnerRepository, InMemoryProfileRepository, PartnerRepository, ProfileRepository,
};
