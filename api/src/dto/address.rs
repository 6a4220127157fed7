use hc_core::services::AddressInput;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddressRequest {
    /// Short name such as "Home" or "Office"
    #[validate(length(min = 1, max = 50))]
    pub label: String,

    #[validate(length(min = 1, max = 100))]
    pub recipient: String,

    #[validate(length(min = 6, max = 20))]
    pub phone: String,

    #[validate(length(min = 1, max = 255))]
    pub street: String,

    #[validate(length(min = 1, max = 100))]
    pub city: String,

    #[validate(length(min = 1, max = 100))]
    pub province: String,

    #[validate(length(min = 3, max = 10))]
    pub postal_code: String,

    #[serde(default)]
    pub is_main: bool,
}

impl From<AddressRequest> for AddressInput {
    fn from(req: AddressRequest) -> Self {
        Self {
            label: req.label,
            recipient: req.recipient,
            phone: req.phone,
            street: req.street,
            city: req.city,
            province: req.province,
            postal_code: req.postal_code,
            is_main: req.is_main,
        }
    }
}
