//! In-memory implementation of OrderRepository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::order::{Order, OrderStatus, PharmacyOrder, PharmacyOrderStatus};
use crate::errors::DomainError;

use super::trait_::OrderRepository;

#[derive(Default)]
struct OrderState {
    orders: HashMap<Uuid, Order>,
    parts: HashMap<Uuid, PharmacyOrder>,
}

/// In-memory order repository
#[derive(Clone, Default)]
pub struct InMemoryOrderRepository {
    state: Arc<RwLock<OrderState>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn create(&self, order: Order, parts: Vec<PharmacyOrder>) -> Result<Order, DomainError> {
        let mut state = self.state.write().await;
        if state.orders.contains_key(&order.id) {
            return Err(DomainError::conflict("Order already exists"));
        }
        for part in parts {
            state.parts.insert(part.id, part);
        }
        state.orders.insert(order.id, order.clone());
        Ok(order)
    }

    async fn find(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        Ok(self.state.read().await.orders.get(&id).cloned())
    }

    async fn update(&self, order: Order) -> Result<Order, DomainError> {
        let mut state = self.state.write().await;
        match state.orders.get_mut(&order.id) {
            Some(existing) => {
                *existing = order.clone();
                Ok(order)
            }
            None => Err(DomainError::not_found("order")),
        }
    }

    async fn list_by_account(&self, account_id: Uuid) -> Result<Vec<Order>, DomainError> {
        let state = self.state.read().await;
        let mut orders: Vec<_> = state
            .orders
            .values()
            .filter(|o| o.account_id == account_id)
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    async fn list(&self, status: Option<OrderStatus>) -> Result<Vec<Order>, DomainError> {
        let state = self.state.read().await;
        let mut orders: Vec<_> = state
            .orders
            .values()
            .filter(|o| status.map_or(true, |s| o.status == s))
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    async fn find_pharmacy_order(&self, id: Uuid) -> Result<Option<PharmacyOrder>, DomainError> {
        Ok(self.state.read().await.parts.get(&id).cloned())
    }

    async fn update_pharmacy_order(&self, order: PharmacyOrder) -> Result<PharmacyOrder, DomainError> {
        let mut state = self.state.write().await;
        match state.parts.get_mut(&order.id) {
            Some(existing) => {
                *existing = order.clone();
                Ok(order)
            }
            None => Err(DomainError::not_found("pharmacy order")),
        }
    }

    async fn pharmacy_orders_of(&self, order_id: Uuid) -> Result<Vec<PharmacyOrder>, DomainError> {
        let state = self.state.read().await;
        let mut parts: Vec<_> = state
            .parts
            .values()
            .filter(|p| p.order_id == order_id)
            .cloned()
            .collect();
        parts.sort_by_key(|p| p.pharmacy_id);
        Ok(parts)
    }

    async fn list_pharmacy_orders(
        &self,
        pharmacy_ids: Option<&[Uuid]>,
        status: Option<PharmacyOrderStatus>,
    ) -> Result<Vec<PharmacyOrder>, DomainError> {
        let state = self.state.read().await;
        let mut parts: Vec<_> = state
            .parts
            .values()
            .filter(|p| pharmacy_ids.map_or(true, |ids| ids.contains(&p.pharmacy_id)))
            .filter(|p| status.map_or(true, |s| p.status == s))
            .cloned()
            .collect();
        parts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(parts)
    }
}
