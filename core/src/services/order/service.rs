//! Order service implementation

use chrono::Utc;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::account::{Actor, Role};
use crate::domain::entities::order::{
    Order, OrderItem, OrderStatus, PharmacyOrder, PharmacyOrderStatus, ShippingAddress,
};
use crate::domain::entities::pharmacy::StockChangeReason;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{
    AddressRepository, CartRepository, CatalogRepository, OrderRepository, PharmacyRepository,
};

use super::shipping::{Shipment, ShippingRates};

/// An order with its per-pharmacy parts
#[derive(Debug, Clone, Serialize)]
pub struct OrderDetails {
    #[serde(flatten)]
    pub order: Order,
    pub grand_total: i64,
    pub pharmacy_orders: Vec<PharmacyOrder>,
}

impl OrderDetails {
    fn new(order: Order, pharmacy_orders: Vec<PharmacyOrder>) -> Self {
        Self {
            grand_total: order.grand_total(),
            order,
            pharmacy_orders,
        }
    }
}

/// A cart line checked against the current offer
struct Reservation {
    pharmacy_id: Uuid,
    item: OrderItem,
    weight_grams: u64,
}

pub struct OrderService {
    orders: Arc<dyn OrderRepository>,
    carts: Arc<dyn CartRepository>,
    addresses: Arc<dyn AddressRepository>,
    pharmacies: Arc<dyn PharmacyRepository>,
    catalog: Arc<dyn CatalogRepository>,
    shipping: Arc<dyn ShippingRates>,
}

impl OrderService {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        carts: Arc<dyn CartRepository>,
        addresses: Arc<dyn AddressRepository>,
        pharmacies: Arc<dyn PharmacyRepository>,
        catalog: Arc<dyn CatalogRepository>,
        shipping: Arc<dyn ShippingRates>,
    ) -> Self {
        Self {
            orders,
            carts,
            addresses,
            pharmacies,
            catalog,
            shipping,
        }
    }

    /// Turn the user's cart into an order shipped to one of their addresses
    pub async fn checkout(&self, user_id: Uuid, address_id: Uuid) -> DomainResult<OrderDetails> {
        let cart = self.carts.list_by_account(user_id).await?;
        if cart.is_empty() {
            return Err(DomainError::validation("Cart is empty"));
        }
        let address = match self.addresses.find(address_id).await? {
            Some(address) if address.account_id == user_id => address,
            _ => return Err(DomainError::not_found("address")),
        };

        let mut lines = Vec::with_capacity(cart.len());
        for entry in &cart {
            let offer = match self.pharmacies.find_item(entry.pharmacy_drug_id).await? {
                Some(offer) if offer.is_active => offer,
                _ => return Err(DomainError::conflict("An item in the cart is no longer sold")),
            };
            let drug = match self.catalog.find_drug(offer.drug_id).await? {
                Some(drug) if drug.is_active => drug,
                _ => return Err(DomainError::conflict("An item in the cart is no longer sold")),
            };
            if entry.quantity > offer.stock {
                return Err(DomainError::conflict(format!("Not enough stock for {}", drug.name)));
            }
            lines.push(Reservation {
                pharmacy_id: offer.pharmacy_id,
                weight_grams: u64::from(drug.weight_grams) * u64::from(entry.quantity),
                item: OrderItem {
                    pharmacy_drug_id: offer.id,
                    drug_id: drug.id,
                    name: drug.name,
                    price: offer.price,
                    quantity: entry.quantity,
                },
            });
        }

        let mut taken: Vec<&OrderItem> = Vec::with_capacity(lines.len());
        for line in &lines {
            if let Err(e) = self
                .pharmacies
                .adjust_stock(line.item.pharmacy_drug_id, -i64::from(line.item.quantity), StockChangeReason::Sale)
                .await
            {
                self.restock(taken.into_iter()).await;
                return Err(e);
            }
            taken.push(&line.item);
        }

        let destination = ShippingAddress {
            recipient: address.recipient,
            phone: address.phone,
            street: address.street,
            city: address.city,
            province: address.province,
            postal_code: address.postal_code,
        };
        let placed = match self.assemble(user_id, destination, &lines).await {
            Ok((order, parts)) => self.orders.create(order, parts.clone()).await.map(|o| (o, parts)),
            Err(e) => Err(e),
        };
        let (order, parts) = match placed {
            Ok(placed) => placed,
            Err(e) => {
                self.restock(lines.iter().map(|l| &l.item)).await;
                return Err(e);
            }
        };

        self.carts.clear(user_id).await?;
        tracing::info!(order_id = %order.id, user_id = %user_id, parts = parts.len(), "order placed");
        Ok(OrderDetails::new(order, parts))
    }

    async fn assemble(
        &self,
        user_id: Uuid,
        destination: ShippingAddress,
        lines: &[Reservation],
    ) -> DomainResult<(Order, Vec<PharmacyOrder>)> {
        let mut by_pharmacy: BTreeMap<Uuid, Vec<&Reservation>> = BTreeMap::new();
        for line in lines {
            by_pharmacy.entry(line.pharmacy_id).or_default().push(line);
        }

        let now = Utc::now();
        let order_id = Uuid::new_v4();
        let mut parts = Vec::with_capacity(by_pharmacy.len());
        for (pharmacy_id, group) in by_pharmacy {
            let pharmacy = self
                .pharmacies
                .find(pharmacy_id)
                .await?
                .ok_or_else(|| DomainError::conflict("A pharmacy in the cart no longer exists"))?;
            let shipment = Shipment {
                origin_city: pharmacy.city,
                destination_city: destination.city.clone(),
                weight_grams: group.iter().map(|l| l.weight_grams).sum(),
            };
            let shipping_cost = self.shipping.cost(&shipment).await?;

            parts.push(PharmacyOrder {
                id: Uuid::new_v4(),
                order_id,
                account_id: user_id,
                pharmacy_id,
                items: group.into_iter().map(|l| l.item.clone()).collect(),
                shipping_cost,
                status: PharmacyOrderStatus::WaitingPayment,
                created_at: now,
                updated_at: now,
            });
        }

        let order = Order {
            id: order_id,
            account_id: user_id,
            shipping_address: destination,
            status: OrderStatus::WaitingPayment,
            payment_proof: None,
            items_total: parts.iter().map(PharmacyOrder::items_total).sum(),
            shipping_total: parts.iter().map(|p| p.shipping_cost).sum(),
            created_at: now,
            updated_at: now,
        };
        Ok((order, parts))
    }

    /// Return items to their pharmacies' stock
    async fn restock<'a>(&self, items: impl Iterator<Item = &'a OrderItem>) {
        for item in items {
            if let Err(e) = self
                .pharmacies
                .adjust_stock(item.pharmacy_drug_id, i64::from(item.quantity), StockChangeReason::Cancellation)
                .await
            {
                tracing::warn!(pharmacy_drug_id = %item.pharmacy_drug_id, error = %e, "failed to restock item");
            }
        }
    }

    async fn find_order(&self, order_id: Uuid) -> DomainResult<Order> {
        self.orders
            .find(order_id)
            .await?
            .ok_or_else(|| DomainError::not_found("order"))
    }

    async fn own_order(&self, user_id: Uuid, order_id: Uuid) -> DomainResult<Order> {
        let order = self.find_order(order_id).await?;
        if order.account_id != user_id {
            return Err(DomainError::forbidden("Order belongs to another user"));
        }
        Ok(order)
    }

    fn transition(order: &mut Order, next: OrderStatus) -> DomainResult<()> {
        if !order.status.can_transition_to(next) {
            return Err(DomainError::conflict(format!(
                "Order cannot move from {:?} to {:?}",
                order.status, next
            )));
        }
        order.status = next;
        order.updated_at = Utc::now();
        Ok(())
    }

    fn transition_part(part: &mut PharmacyOrder, next: PharmacyOrderStatus) -> DomainResult<()> {
        if !part.status.can_transition_to(next) {
            return Err(DomainError::conflict(format!(
                "Pharmacy order cannot move from {:?} to {:?}",
                part.status, next
            )));
        }
        part.status = next;
        part.updated_at = Utc::now();
        Ok(())
    }

    pub async fn upload_payment_proof(&self, user_id: Uuid, order_id: Uuid, proof: &str) -> DomainResult<Order> {
        let proof = proof.trim();
        if proof.is_empty() {
            return Err(DomainError::validation("Payment proof is required"));
        }
        let mut order = self.own_order(user_id, order_id).await?;
        Self::transition(&mut order, OrderStatus::WaitingConfirmation)?;
        order.payment_proof = Some(proof.to_string());
        self.orders.update(order).await
    }

    /// Admin accepts the payment; every pharmacy starts processing
    pub async fn confirm_payment(&self, order_id: Uuid) -> DomainResult<OrderDetails> {
        let mut order = self.find_order(order_id).await?;
        Self::transition(&mut order, OrderStatus::Paid)?;
        let order = self.orders.update(order).await?;

        let mut parts = Vec::new();
        for mut part in self.orders.pharmacy_orders_of(order_id).await? {
            if part.status == PharmacyOrderStatus::WaitingPayment {
                Self::transition_part(&mut part, PharmacyOrderStatus::Processing)?;
                part = self.orders.update_pharmacy_order(part).await?;
            }
            parts.push(part);
        }
        tracing::info!(order_id = %order_id, "payment confirmed");
        Ok(OrderDetails::new(order, parts))
    }

    /// User cancels an unpaid order; its stock returns to the pharmacies
    pub async fn cancel(&self, user_id: Uuid, order_id: Uuid) -> DomainResult<OrderDetails> {
        let mut order = self.own_order(user_id, order_id).await?;
        Self::transition(&mut order, OrderStatus::Cancelled)?;
        let order = self.orders.update(order).await?;

        let mut parts = Vec::new();
        for mut part in self.orders.pharmacy_orders_of(order_id).await? {
            if part.status.can_transition_to(PharmacyOrderStatus::Cancelled) {
                Self::transition_part(&mut part, PharmacyOrderStatus::Cancelled)?;
                self.restock(part.items.iter()).await;
                part = self.orders.update_pharmacy_order(part).await?;
            }
            parts.push(part);
        }
        tracing::info!(order_id = %order_id, "order cancelled");
        Ok(OrderDetails::new(order, parts))
    }

    pub async fn list_for_user(&self, user_id: Uuid) -> DomainResult<Vec<Order>> {
        self.orders.list_by_account(user_id).await
    }

    pub async fn list_all(&self, status: Option<OrderStatus>) -> DomainResult<Vec<Order>> {
        self.orders.list(status).await
    }

    /// An order as seen by its owner or an admin
    pub async fn order(&self, viewer: Actor, order_id: Uuid) -> DomainResult<OrderDetails> {
        let order = self.find_order(order_id).await?;
        if !viewer.is_admin() && order.account_id != viewer.account_id {
            return Err(DomainError::forbidden("Order belongs to another user"));
        }
        let parts = self.orders.pharmacy_orders_of(order_id).await?;
        Ok(OrderDetails::new(order, parts))
    }

    async fn find_part(&self, id: Uuid) -> DomainResult<PharmacyOrder> {
        self.orders
            .find_pharmacy_order(id)
            .await?
            .ok_or_else(|| DomainError::not_found("pharmacy order"))
    }

    async fn manages(&self, manager_id: Uuid, pharmacy_id: Uuid) -> DomainResult<bool> {
        Ok(self
            .pharmacies
            .find(pharmacy_id)
            .await?
            .is_some_and(|p| p.manager_id == manager_id))
    }

    async fn managed_part(&self, manager_id: Uuid, id: Uuid) -> DomainResult<PharmacyOrder> {
        let part = self.find_part(id).await?;
        if !self.manages(manager_id, part.pharmacy_id).await? {
            return Err(DomainError::forbidden("Pharmacy order belongs to another partner"));
        }
        Ok(part)
    }

    /// A pharmacy order as seen by its buyer, the pharmacy's manager or an admin
    pub async fn pharmacy_order(&self, viewer: Actor, id: Uuid) -> DomainResult<PharmacyOrder> {
        let part = self.find_part(id).await?;
        let allowed = match viewer.role {
            Role::Admin => true,
            Role::PharmacyManager => self.manages(viewer.account_id, part.pharmacy_id).await?,
            Role::User | Role::Doctor => part.account_id == viewer.account_id,
        };
        if !allowed {
            return Err(DomainError::forbidden("Not allowed to view this pharmacy order"));
        }
        Ok(part)
    }

    pub async fn list_for_manager(
        &self,
        manager_id: Uuid,
        status: Option<PharmacyOrderStatus>,
    ) -> DomainResult<Vec<PharmacyOrder>> {
        let ids: Vec<Uuid> = self
            .pharmacies
            .list_by_manager(manager_id)
            .await?
            .into_iter()
            .map(|p| p.id)
            .collect();
        self.orders.list_pharmacy_orders(Some(&ids), status).await
    }

    pub async fn send(&self, manager_id: Uuid, id: Uuid) -> DomainResult<PharmacyOrder> {
        let mut part = self.managed_part(manager_id, id).await?;
        Self::transition_part(&mut part, PharmacyOrderStatus::Sent)?;
        self.orders.update_pharmacy_order(part).await
    }

    /// Manager refuses a paid pharmacy order; its stock is returned
    pub async fn cancel_by_manager(&self, manager_id: Uuid, id: Uuid) -> DomainResult<PharmacyOrder> {
        let mut part = self.managed_part(manager_id, id).await?;
        if part.status != PharmacyOrderStatus::Processing {
            return Err(DomainError::conflict("Only processing orders can be cancelled"));
        }
        Self::transition_part(&mut part, PharmacyOrderStatus::Cancelled)?;
        self.restock(part.items.iter()).await;
        self.orders.update_pharmacy_order(part).await
    }

    pub async fn confirm_delivery(&self, user_id: Uuid, id: Uuid) -> DomainResult<PharmacyOrder> {
        let mut part = self.find_part(id).await?;
        if part.account_id != user_id {
            return Err(DomainError::forbidden("Pharmacy order belongs to another user"));
        }
        Self::transition_part(&mut part, PharmacyOrderStatus::Delivered)?;
        self.orders.update_pharmacy_order(part).await
    }
}
