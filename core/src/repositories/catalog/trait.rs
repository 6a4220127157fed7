//! Catalog repository trait covering drugs and their reference tables.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::catalog::{Category, Drug, DrugClassification, DrugForm};
use crate::errors::DomainError;

/// Filter applied when searching the drug catalog
#[derive(Debug, Clone, Default)]
pub struct DrugFilter {
    /// Case-insensitive match against name, generic name and manufacturer
    pub query: Option<String>,
    pub category_id: Option<Uuid>,
    /// Include deactivated drugs
    pub include_inactive: bool,
}

#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Drugs matching the filter, ordered by name
    async fn search_drugs(&self, filter: &DrugFilter) -> Result<Vec<Drug>, DomainError>;

    async fn find_drug(&self, id: Uuid) -> Result<Option<Drug>, DomainError>;

    /// Insert or replace a drug
    async fn save_drug(&self, drug: Drug) -> Result<Drug, DomainError>;

    /// Number of drugs, active or not, referencing a category
    async fn count_drugs_in_category(&self, category_id: Uuid) -> Result<usize, DomainError>;

    /// All categories, ordered by name
    async fn list_categories(&self) -> Result<Vec<Category>, DomainError>;

    async fn find_category(&self, id: Uuid) -> Result<Option<Category>, DomainError>;

    /// Insert or replace a category. Names are unique, ignoring case.
    async fn save_category(&self, category: Category) -> Result<Category, DomainError>;

    /// Delete a category. Returns whether it existed.
    async fn delete_category(&self, id: Uuid) -> Result<bool, DomainError>;

    async fn list_forms(&self) -> Result<Vec<DrugForm>, DomainError>;

    async fn find_form(&self, id: Uuid) -> Result<Option<DrugForm>, DomainError>;

    async fn save_form(&self, form: DrugForm) -> Result<DrugForm, DomainError>;

    async fn list_classifications(&self) -> Result<Vec<DrugClassification>, DomainError>;

    async fn find_classification(&self, id: Uuid) -> Result<Option<DrugClassification>, DomainError>;

    async fn save_classification(
        &self,
        classification: DrugClassification,
    ) -> Result<DrugClassification, DomainError>;
}
