use chrono::NaiveDate;
use hc_core::services::{DoctorFilter, DoctorProfileUpdate, UserProfileUpdate};
use hc_core::Gender;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateUserProfileRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(length(min = 6, max = 20))]
    pub phone: Option<String>,

    pub birth_date: Option<NaiveDate>,

    pub gender: Option<Gender>,
}

impl From<UpdateUserProfileRequest> for UserProfileUpdate {
    fn from(req: UpdateUserProfileRequest) -> Self {
        Self {
            name: req.name,
            phone: req.phone,
            birth_date: req.birth_date,
            gender: req.gender,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateDoctorProfileRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    pub specialization_id: Option<Uuid>,

    #[validate(length(min = 1, max = 64))]
    pub license_number: Option<String>,

    #[validate(range(max = 80))]
    pub experience_years: Option<u32>,

    /// Consultation fee in the smallest currency unit
    #[validate(range(min = 0))]
    pub fee: Option<i64>,
}

impl From<UpdateDoctorProfileRequest> for DoctorProfileUpdate {
    fn from(req: UpdateDoctorProfileRequest) -> Self {
        Self {
            name: req.name,
            specialization_id: req.specialization_id,
            license_number: req.license_number,
            experience_years: req.experience_years,
            fee: req.fee,
        }
    }
}

/// Body of `PATCH /doctors/status`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorStatusRequest {
    pub is_online: bool,
}

/// Query of `GET /doctors`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DoctorQuery {
    pub specialization_id: Option<Uuid>,
    #[serde(default)]
    pub online: bool,
}

impl From<DoctorQuery> for DoctorFilter {
    fn from(query: DoctorQuery) -> Self {
        Self {
            specialization_id: query.specialization_id,
            online_only: query.online,
        }
    }
}
