//! Drug catalog browsing and administration

use chrono::Utc;
use hc_shared::{PaginatedResponse, Pagination};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::catalog::{Category, Drug, DrugClassification, DrugForm};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{CatalogRepository, DrugFilter, PharmacyRepository};

/// Fields of a drug set by an admin
#[derive(Debug, Clone)]
pub struct DrugInput {
    pub name: String,
    pub generic_name: String,
    pub manufacturer: String,
    pub description: String,
    pub category_id: Uuid,
    pub form_id: Uuid,
    pub classification_id: Uuid,
    pub unit_in_pack: String,
    pub weight_grams: u32,
}

/// Where a drug can be bought
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrugOffer {
    pub pharmacy_drug_id: Uuid,
    pub pharmacy_id: Uuid,
    pub pharmacy_name: String,
    pub city: String,
    pub price: i64,
    pub stock: u32,
}

/// A drug together with its reference data
#[derive(Debug, Clone, Serialize)]
pub struct DrugDetails {
    #[serde(flatten)]
    pub drug: Drug,
    pub category: Option<Category>,
    pub form: Option<DrugForm>,
    pub classification: Option<DrugClassification>,
}

pub struct CatalogService {
    catalog: Arc<dyn CatalogRepository>,
    pharmacies: Arc<dyn PharmacyRepository>,
}

impl CatalogService {
    pub fn new(catalog: Arc<dyn CatalogRepository>, pharmacies: Arc<dyn PharmacyRepository>) -> Self {
        Self { catalog, pharmacies }
    }

    /// Active drugs, optionally searched by text and category
    pub async fn list_drugs(
        &self,
        query: Option<String>,
        category_id: Option<Uuid>,
        pagination: Pagination,
    ) -> DomainResult<PaginatedResponse<Drug>> {
        let filter = DrugFilter {
            query,
            category_id,
            include_inactive: false,
        };
        let drugs = self.catalog.search_drugs(&filter).await?;
        Ok(pagination.validate().paginate(drugs))
    }

    /// An active drug with its category, form and classification
    pub async fn drug(&self, drug_id: Uuid) -> DomainResult<DrugDetails> {
        let drug = self.active_drug(drug_id).await?;
        Ok(DrugDetails {
            category: self.catalog.find_category(drug.category_id).await?,
            form: self.catalog.find_form(drug.form_id).await?,
            classification: self.catalog.find_classification(drug.classification_id).await?,
            drug,
        })
    }

    pub(crate) async fn active_drug(&self, drug_id: Uuid) -> DomainResult<Drug> {
        match self.catalog.find_drug(drug_id).await? {
            Some(drug) if drug.is_active => Ok(drug),
            _ => Err(DomainError::not_found("drug")),
        }
    }

    /// Pharmacies currently selling a drug, cheapest first
    pub async fn drug_offers(&self, drug_id: Uuid) -> DomainResult<Vec<DrugOffer>> {
        self.active_drug(drug_id).await?;

        let mut offers = Vec::new();
        for item in self.pharmacies.list_items_by_drug(drug_id).await? {
            if !item.is_active || item.stock == 0 {
                continue;
            }
            let Some(pharmacy) = self.pharmacies.find(item.pharmacy_id).await? else {
                continue;
            };
            if !pharmacy.is_active {
                continue;
            }
            offers.push(DrugOffer {
                pharmacy_drug_id: item.id,
                pharmacy_id: pharmacy.id,
                pharmacy_name: pharmacy.name,
                city: pharmacy.city,
                price: item.price,
                stock: item.stock,
            });
        }
        offers.sort_by(|a, b| a.price.cmp(&b.price).then_with(|| a.pharmacy_name.cmp(&b.pharmacy_name)));
        Ok(offers)
    }

    pub async fn categories(&self) -> DomainResult<Vec<Category>> {
        self.catalog.list_categories().await
    }

    pub async fn forms(&self) -> DomainResult<Vec<DrugForm>> {
        self.catalog.list_forms().await
    }

    pub async fn classifications(&self) -> DomainResult<Vec<DrugClassification>> {
        self.catalog.list_classifications().await
    }

    async fn validate_input(&self, input: &DrugInput) -> DomainResult<()> {
        if input.name.trim().is_empty() {
            return Err(DomainError::validation("Drug name is required"));
        }
        if input.weight_grams == 0 {
            return Err(DomainError::validation("Weight must be positive"));
        }
        if self.catalog.find_category(input.category_id).await?.is_none() {
            return Err(DomainError::validation("Unknown category"));
        }
        if self.catalog.find_form(input.form_id).await?.is_none() {
            return Err(DomainError::validation("Unknown drug form"));
        }
        if self
            .catalog
            .find_classification(input.classification_id)
            .await?
            .is_none()
        {
            return Err(DomainError::validation("Unknown drug classification"));
        }
        Ok(())
    }

    pub async fn create_drug(&self, input: DrugInput) -> DomainResult<Drug> {
        self.validate_input(&input).await?;

        let now = Utc::now();
        let drug = Drug {
            id: Uuid::new_v4(),
            name: input.name.trim().to_string(),
            generic_name: input.generic_name.trim().to_string(),
            manufacturer: input.manufacturer.trim().to_string(),
            description: input.description,
            category_id: input.category_id,
            form_id: input.form_id,
            classification_id: input.classification_id,
            unit_in_pack: input.unit_in_pack,
            weight_grams: input.weight_grams,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.catalog.save_drug(drug).await
    }

    pub async fn update_drug(&self, drug_id: Uuid, input: DrugInput) -> DomainResult<Drug> {
        let mut drug = self.active_drug(drug_id).await?;
        self.validate_input(&input).await?;

        drug.name = input.name.trim().to_string();
        drug.generic_name = input.generic_name.trim().to_string();
        drug.manufacturer = input.manufacturer.trim().to_string();
        drug.description = input.description;
        drug.category_id = input.category_id;
        drug.form_id = input.form_id;
        drug.classification_id = input.classification_id;
        drug.unit_in_pack = input.unit_in_pack;
        drug.weight_grams = input.weight_grams;
        drug.updated_at = Utc::now();
        self.catalog.save_drug(drug).await
    }

    /// Deactivate a drug. It disappears from the catalog but stays
    /// referenced by past orders and prescriptions.
    pub async fn delete_drug(&self, drug_id: Uuid) -> DomainResult<()> {
        let mut drug = self.active_drug(drug_id).await?;
        drug.is_active = false;
        drug.updated_at = Utc::now();
        self.catalog.save_drug(drug).await?;
        Ok(())
    }

    pub async fn create_category(&self, name: &str) -> DomainResult<Category> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("Category name is required"));
        }
        self.catalog.save_category(Category::new(name)).await
    }

    pub async fn update_category(&self, category_id: Uuid, name: &str) -> DomainResult<Category> {
        let mut category = self
            .catalog
            .find_category(category_id)
            .await?
            .ok_or_else(|| DomainError::not_found("category"))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("Category name is required"));
        }
        category.name = name.to_string();
        self.catalog.save_category(category).await
    }

    pub async fn delete_category(&self, category_id: Uuid) -> DomainResult<()> {
        if self.catalog.find_category(category_id).await?.is_none() {
            return Err(DomainError::not_found("category"));
        }
        if self.catalog.count_drugs_in_category(category_id).await? > 0 {
            return Err(DomainError::conflict("Category is still used by drugs"));
        }
        self.catalog.delete_category(category_id).await?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::entities::pharmacy::{Pharmacy, PharmacyDrug};
    use crate::repositories::{InMemoryCatalogRepository, InMemoryPharmacyRepository};

    /// Catalog with one category, form and classification of each kind
    pub(crate) struct CatalogFixture {
        pub repo: InMemoryCatalogRepository,
        pub category: Category,
        pub form: DrugForm,
        pub over_the_counter: DrugClassification,
        pub prescription_only: DrugClassification,
    }

    impl CatalogFixture {
        pub async fn new() -> Self {
            let repo = InMemoryCatalogRepository::new();
            let category = repo.save_category(Category::new("Analgesics")).await.unwrap();
            let form = repo.save_form(DrugForm::new("Tablet")).await.unwrap();
            let over_the_counter = repo
                .save_classification(DrugClassification::new("Over the counter", false))
                .await
                .unwrap();
            let prescription_only = repo
                .save_classification(DrugClassification::new("Hard drug", true))
                .await
                .unwrap();
            Self {
                repo,
                category,
                form,
                over_the_counter,
                prescription_only,
            }
        }

        pub fn input(&self, name: &str, prescription: bool) -> DrugInput {
            DrugInput {
                name: name.into(),
                generic_name: name.to_lowercase(),
                manufacturer: "Kalbe".into(),
                description: String::new(),
                category_id: self.category.id,
                form_id: self.form.id,
                classification_id: if prescription {
                    self.prescription_only.id
                } else {
                    self.over_the_counter.id
                },
                unit_in_pack: "10 tablets".into(),
                weight_grams: 50,
            }
        }
    }

    pub(crate) fn pharmacy(manager_id: Uuid, name: &str, city: &str) -> Pharmacy {
        let now = Utc::now();
        Pharmacy {
            id: Uuid::new_v4(),
            manager_id,
            name: name.into(),
            address: "Jl. Asia Afrika".into(),
            city: city.into(),
            pharmacist_name: "Apt. Sari".into(),
            license_number: "SIPA-9".into(),
            operational_hours: "08:00-21:00".into(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub(crate) fn stocked(pharmacy_id: Uuid, drug_id: Uuid, price: i64, stock: u32) -> PharmacyDrug {
        PharmacyDrug {
            id: Uuid::new_v4(),
            pharmacy_id,
            drug_id,
            price,
            stock,
            is_active: true,
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_and_soft_delete_drug() {
        let catalog = CatalogFixture::new().await;
        let service = CatalogService::new(
            Arc::new(catalog.repo.clone()),
            Arc::new(InMemoryPharmacyRepository::new()),
        );

        let drug = service.create_drug(catalog.input("Panadol", false)).await.unwrap();
        let details = service.drug(drug.id).await.unwrap();
        assert_eq!(details.category.unwrap().name, "Analgesics");

        service.delete_drug(drug.id).await.unwrap();
        assert!(service.drug(drug.id).await.is_err());
        let page = service.list_drugs(None, None, Pagination::default()).await.unwrap();
        assert_eq!(page.total, 0);
    }

    #[tokio::test]
    async fn test_drug_references_must_exist() {
        let catalog = CatalogFixture::new().await;
        let service = CatalogService::new(
            Arc::new(catalog.repo.clone()),
            Arc::new(InMemoryPharmacyRepository::new()),
        );

        let mut input = catalog.input("Panadol", false);
        input.form_id = Uuid::new_v4();
        assert!(matches!(
            service.create_drug(input).await.unwrap_err(),
            DomainError::Validation { .. }
        ));
    }

    #[tokio::test]
    async fn test_list_drugs_paginates() {
        let catalog = CatalogFixture::new().await;
        let service = CatalogService::new(
            Arc::new(catalog.repo.clone()),
            Arc::new(InMemoryPharmacyRepository::new()),
        );
        for name in ["Amoxicillin", "Bodrex", "Cetirizine", "Diapet", "Entrostop"] {
            service.create_drug(catalog.input(name, false)).await.unwrap();
        }

        let page = service
            .list_drugs(None, None, Pagination::new(2, 2))
            .await
            .unwrap();
        assert_eq!(page.total, 5);
        let names: Vec<_> = page.items.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Cetirizine", "Diapet"]);
        assert!(page.has_next);

        let page = service
            .list_drugs(Some("stop".into()), None, Pagination::default())
            .await
            .unwrap();
        assert_eq!(page.items.len(), 1);
    }

    #[tokio::test]
    async fn test_offers_cheapest_first_and_in_stock_only() {
        let catalog = CatalogFixture::new().await;
        let pharmacies = InMemoryPharmacyRepository::new();
        let service = CatalogService::new(Arc::new(catalog.repo.clone()), Arc::new(pharmacies.clone()));
        let drug = service.create_drug(catalog.input("Panadol", false)).await.unwrap();

        let manager = Uuid::new_v4();
        let cheap = pharmacies.save(pharmacy(manager, "Cheap", "Bandung")).await.unwrap();
        let pricey = pharmacies.save(pharmacy(manager, "Pricey", "Jakarta")).await.unwrap();
        let empty = pharmacies.save(pharmacy(manager, "Empty", "Bogor")).await.unwrap();
        pharmacies.save_item(stocked(pricey.id, drug.id, 9_000, 3)).await.unwrap();
        pharmacies.save_item(stocked(cheap.id, drug.id, 7_500, 1)).await.unwrap();
        pharmacies.save_item(stocked(empty.id, drug.id, 5_000, 0)).await.unwrap();

        let offers = service.drug_offers(drug.id).await.unwrap();
        let names: Vec<_> = offers.iter().map(|o| o.pharmacy_name.as_str()).collect();
        assert_eq!(names, vec!["Cheap", "Pricey"]);
    }

    #[tokio::test]
    async fn test_category_in_use_cannot_be_deleted() {
        let catalog = CatalogFixture::new().await;
        let service = CatalogService::new(
            Arc::new(catalog.repo.clone()),
            Arc::new(InMemoryPharmacyRepository::new()),
        );
        service.create_drug(catalog.input("Panadol", false)).await.unwrap();

        assert!(matches!(
            service.delete_category(catalog.category.id).await.unwrap_err(),
            DomainError::Conflict { .. }
        ));

        let unused = service.create_category("Vitamins").await.unwrap();
        assert!(service.create_category("vitamins").await.is_err());
        service.delete_category(unused.id).await.unwrap();
        assert!(matches!(
            service.delete_category(unused.id).await.unwrap_err(),
            DomainError::NotFound { .. }
        ));
    }
}
