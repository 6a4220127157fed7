use hc_core::services::{NewPartner, PartnerUpdate};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Admin-created pharmacy partner and its manager login
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PartnerRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,

    #[validate(length(min = 1, max = 150))]
    pub company_name: String,

    #[validate(length(min = 6, max = 20))]
    pub phone: String,

    #[validate(length(min = 1, max = 255))]
    pub address: String,
}

impl From<PartnerRequest> for NewPartner {
    fn from(req: PartnerRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
            company_name: req.company_name,
            phone: req.phone,
            address: req.address,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct PartnerUpdateRequest {
    #[validate(length(min = 1, max = 150))]
    pub company_name: Option<String>,

    #[validate(length(min = 6, max = 20))]
    pub phone: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub address: Option<String>,
}

impl From<PartnerUpdateRequest> for PartnerUpdate {
    fn from(req: PartnerUpdateRequest) -> Self {
        Self {
            company_name: req.company_name,
            phone: req.phone,
            address: req.address,
        }
    }
}
