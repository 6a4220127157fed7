//! Domain entities representing core business objects.

pub mod account;
pub mod address;
pub mod cart;
pub mod catalog;
pub mod chat;
pub mod order;
pub mod pharmacy;
pub mod profile;
pub mod token;

// Re-export commonly used types
pub use account::{normalize_email, Account, Actor, Role};
pub use address::Address;
pub use cart::CartItem;
pub use catalog::{Category, Drug, DrugClassification, DrugForm};
pub use chat::{ChatMessage, ChatRoom, MessageKind, Prescription, PrescriptionItem, RoomStatus};
pub use order::{Order, OrderItem, OrderStatus, PharmacyOrder, PharmacyOrderStatus, ShippingAddress};
pub use pharmacy::{Pharmacy, PharmacyDrug, StockChange, StockChangeReason};
pub use profile::{DoctorProfile, Gender, Partner, Specialization, UserProfile};
pub use token::{
    Claims, TokenPair, TokenPurpose, ACCESS_TOKEN_EXPIRY_MINUTES, REFRESH_TOKEN_EXPIRY_DAYS,
    RESET_TOKEN_EXPIRY_MINUTES, VERIFICATION_TOKEN_EXPIRY_HOURS,
};
