//! Business services containing domain logic and use cases.
//!
//! Services hold repository and port trait objects and are assembled once
//! by the application's composition root.

pub mod address;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod order;
pub mod partner;
pub mod pharmacy;
pub mod profile;
pub mod report;
pub mod telemedicine;
pub mod token;

// Re-export commonly used types
pub use address::{AddressInput, AddressService};
pub use auth::{AuthService, DoctorRegistration, Mailer, PasswordHasher, UserRegistration};
pub use cart::{CartLine, CartService, CartView};
pub use catalog::{CatalogService, DrugDetails, DrugInput, DrugOffer};
pub use order::{OrderDetails, OrderService, Shipment, ShippingRates};
pub use partner::{NewPartner, PartnerService, PartnerUpdate};
pub use pharmacy::{
    InventoryEntry, InventoryUpdate, MutationReceipt, NewInventoryItem, PharmacyInput, PharmacyService,
    StockMutation,
};
pub use profile::{DoctorFilter, DoctorProfileUpdate, ProfileService, UserProfileUpdate};
pub use report::{DrugSales, ReportService};
pub use telemedicine::{ListenBatch, TelemedicineService, DEFAULT_LISTEN_TIMEOUT};
pub use token::{TokenService, TokenServiceConfig};
