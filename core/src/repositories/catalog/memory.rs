//! In-memory implementation of CatalogRepository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::catalog::{Category, Drug, DrugClassification, DrugForm};
use crate::errors::DomainError;

use super::trait_::{CatalogRepository, DrugFilter};

#[derive(Default)]
struct CatalogState {
    drugs: HashMap<Uuid, Drug>,
    categories: HashMap<Uuid, Category>,
    forms: HashMap<Uuid, DrugForm>,
    classifications: HashMap<Uuid, DrugClassification>,
}

/// In-memory catalog repository
#[derive(Clone, Default)]
pub struct InMemoryCatalogRepository {
    state: Arc<RwLock<CatalogState>>,
}

impl InMemoryCatalogRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted_by_name<T: Clone>(values: impl Iterator<Item = T>, name: impl Fn(&T) -> &str) -> Vec<T> {
    let mut list: Vec<T> = values.collect();
    list.sort_by(|a, b| name(a).cmp(name(b)));
    list
}

impl DrugFilter {
    fn matches(&self, drug: &Drug) -> bool {
        if !self.include_inactive && !drug.is_active {
            return false;
        }
        if let Some(category_id) = self.category_id {
            if drug.category_id != category_id {
                return false;
            }
        }
        match self.query.as_deref().map(str::trim) {
            Some(query) if !query.is_empty() => {
                let query = query.to_lowercase();
                [&drug.name, &drug.generic_name, &drug.manufacturer]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&query))
            }
            _ => true,
        }
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalogRepository {
    async fn search_drugs(&self, filter: &DrugFilter) -> Result<Vec<Drug>, DomainError> {
        let state = self.state.read().await;
        Ok(sorted_by_name(
            state.drugs.values().filter(|d| filter.matches(d)).cloned(),
            |d| d.name.as_str(),
        ))
    }

    async fn find_drug(&self, id: Uuid) -> Result<Option<Drug>, DomainError> {
        Ok(self.state.read().await.drugs.get(&id).cloned())
    }

    async fn save_drug(&self, drug: Drug) -> Result<Drug, DomainError> {
        let mut state = self.state.write().await;
        state.drugs.insert(drug.id, drug.clone());
        Ok(drug)
    }

    async fn count_drugs_in_category(&self, category_id: Uuid) -> Result<usize, DomainError> {
        let state = self.state.read().await;
        Ok(state.drugs.values().filter(|d| d.category_id == category_id).count())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, DomainError> {
        let state = self.state.read().await;
        Ok(sorted_by_name(state.categories.values().cloned(), |c| c.name.as_str()))
    }

    async fn find_category(&self, id: Uuid) -> Result<Option<Category>, DomainError> {
        Ok(self.state.read().await.categories.get(&id).cloned())
    }

    async fn save_category(&self, category: Category) -> Result<Category, DomainError> {
        let mut state = self.state.write().await;
        if state
            .categories
            .values()
            .any(|c| c.id != category.id && c.name.eq_ignore_ascii_case(&category.name))
        {
            return Err(DomainError::conflict("Category name is already used"));
        }
        state.categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn delete_category(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.state.write().await.categories.remove(&id).is_some())
    }

    async fn list_forms(&self) -> Result<Vec<DrugForm>, DomainError> {
        let state = self.state.read().await;
        Ok(sorted_by_name(state.forms.values().cloned(), |f| f.name.as_str()))
    }

    async fn find_form(&self, id: Uuid) -> Result<Option<DrugForm>, DomainError> {
        Ok(self.state.read().await.forms.get(&id).cloned())
    }

    async fn save_form(&self, form: DrugForm) -> Result<DrugForm, DomainError> {
        let mut state = self.state.write().await;
        state.forms.insert(form.id, form.clone());
        Ok(form)
    }

    async fn list_classifications(&self) -> Result<Vec<DrugClassification>, DomainError> {
        let state = self.state.read().await;
        Ok(sorted_by_name(state.classifications.values().cloned(), |c| c.name.as_str()))
    }

    async fn find_classification(&self, id: Uuid) -> Result<Option<DrugClassification>, DomainError> {
        Ok(self.state.read().await.classifications.get(&id).cloned())
    }

    async fn save_classification(
        &self,
        classification: DrugClassification,
    ) -> Result<DrugClassification, DomainError> {
        let mut state = self.state.write().await;
        state.classifications.insert(classification.id, classification.clone());
        Ok(classification)
    }
}
