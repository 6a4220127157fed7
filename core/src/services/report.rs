//! Drug sales reports for admins and partners

use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult};
use crate::repositories::{OrderRepository, PharmacyRepository};

/// Sales of one drug over the reported pharmacies
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrugSales {
    pub drug_id: Uuid,
    pub name: String,
    pub quantity: u64,
    pub revenue: i64,
}

pub struct ReportService {
    orders: Arc<dyn OrderRepository>,
    pharmacies: Arc<dyn PharmacyRepository>,
}

impl ReportService {
    pub fn new(orders: Arc<dyn OrderRepository>, pharmacies: Arc<dyn PharmacyRepository>) -> Self {
        Self { orders, pharmacies }
    }

    /// Quantity sold and revenue per drug, highest revenue first.
    ///
    /// Only pharmacy orders that were paid and not cancelled count.
    /// `None` covers every pharmacy.
    pub async fn drug_sales(&self, pharmacy_ids: Option<&[Uuid]>) -> DomainResult<Vec<DrugSales>> {
        let parts = self.orders.list_pharmacy_orders(pharmacy_ids, None).await?;

        let mut totals: HashMap<Uuid, DrugSales> = HashMap::new();
        for part in parts.iter().filter(|p| p.status.counts_as_sale()) {
            for item in &part.items {
                let entry = totals.entry(item.drug_id).or_insert_with(|| DrugSales {
                    drug_id: item.drug_id,
                    name: item.name.clone(),
                    quantity: 0,
                    revenue: 0,
                });
                entry.quantity += u64::from(item.quantity);
                entry.revenue += item.subtotal();
            }
        }

        let mut report: Vec<DrugSales> = totals.into_values().collect();
        report.sort_by(|a, b| b.revenue.cmp(&a.revenue).then_with(|| a.name.cmp(&b.name)));
        Ok(report)
    }

    /// Admin report, optionally narrowed to one pharmacy
    pub async fn for_admin(&self, pharmacy_id: Option<Uuid>) -> DomainResult<Vec<DrugSales>> {
        match pharmacy_id {
            Some(id) => self.drug_sales(Some(&[id])).await,
            None => self.drug_sales(None).await,
        }
    }

    /// Partner report over their own pharmacies, optionally narrowed to one
    pub async fn for_manager(&self, manager_id: Uuid, pharmacy_id: Option<Uuid>) -> DomainResult<Vec<DrugSales>> {
        let mut ids: Vec<Uuid> = self
            .pharmacies
            .list_by_manager(manager_id)
            .await?
            .into_iter()
            .map(|p| p.id)
            .collect();

        if let Some(id) = pharmacy_id {
            if !ids.contains(&id) {
                return Err(DomainError::forbidden("Pharmacy belongs to another partner"));
            }
            ids = vec![id];
        }
        self.drug_sales(Some(&ids)).await
    }
}
