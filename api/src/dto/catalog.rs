use hc_core::services::DrugInput;
use hc_shared::Pagination;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Query of `GET /drugs`.
///
/// Paging fields are inlined rather than flattened; flattened numbers do
/// not survive query-string decoding.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DrugQuery {
    /// Free text matched against name, generic name and manufacturer
    pub q: Option<String>,
    pub category_id: Option<Uuid>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl DrugQuery {
    pub fn pagination(&self) -> Pagination {
        let defaults = Pagination::default();
        Pagination::new(
            self.page.unwrap_or(defaults.page),
            self.per_page.unwrap_or(defaults.per_page),
        )
    }

    pub fn search(&self) -> Option<String> {
        self.q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_owned)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DrugRequest {
    #[validate(length(min = 1, max = 150))]
    pub name: String,

    #[validate(length(min = 1, max = 150))]
    pub generic_name: String,

    #[validate(length(min = 1, max = 150))]
    pub manufacturer: String,

    #[serde(default)]
    #[validate(length(max = 5000))]
    pub description: String,

    pub category_id: Uuid,
    pub form_id: Uuid,
    pub classification_id: Uuid,

    /// e.g. "strip of 10 tablets"
    #[validate(length(min = 1, max = 100))]
    pub unit_in_pack: String,

    #[validate(range(min = 1))]
    pub weight_grams: u32,
}

impl From<DrugRequest> for DrugInput {
    fn from(req: DrugRequest) -> Self {
        Self {
            name: req.name,
            generic_name: req.generic_name,
            manufacturer: req.manufacturer,
            description: req.description,
            category_id: req.category_id,
            form_id: req.form_id,
            classification_id: req.classification_id,
            unit_in_pack: req.unit_in_pack,
            weight_grams: req.weight_grams,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CategoryRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}
