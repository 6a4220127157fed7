//! Order repository trait for orders and their per-pharmacy parts.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::order::{Order, OrderStatus, PharmacyOrder, PharmacyOrderStatus};
use crate::errors::DomainError;

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Store a new order together with its pharmacy orders
    async fn create(&self, order: Order, parts: Vec<PharmacyOrder>) -> Result<Order, DomainError>;

    async fn find(&self, id: Uuid) -> Result<Option<Order>, DomainError>;

    /// Replace an existing order
    async fn update(&self, order: Order) -> Result<Order, DomainError>;

    /// Orders of one account, newest first
    async fn list_by_account(&self, account_id: Uuid) -> Result<Vec<Order>, DomainError>;

    /// All orders, newest first, optionally filtered by status
    async fn list(&self, status: Option<OrderStatus>) -> Result<Vec<Order>, DomainError>;

    async fn find_pharmacy_order(&self, id: Uuid) -> Result<Option<PharmacyOrder>, DomainError>;

    /// Replace an existing pharmacy order
    async fn update_pharmacy_order(&self, order: PharmacyOrder) -> Result<PharmacyOrder, DomainError>;

    /// Pharmacy orders belonging to one order
    async fn pharmacy_orders_of(&self, order_id: Uuid) -> Result<Vec<PharmacyOrder>, DomainError>;

    /// Pharmacy orders, newest first, optionally restricted to some
    /// pharmacies and to one status
    async fn list_pharmacy_orders(
        &self,
        pharmacy_ids: Option<&[Uuid]>,
        status: Option<PharmacyOrderStatus>,
    ) -> Result<Vec<PharmacyOrder>, DomainError>;
}
