//! Role-specific profile entities.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// Profile of an account with the `user` role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub account_id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn new(account_id: Uuid, name: String) -> Self {
        Self {
            account_id,
            name,
            phone: None,
            birth_date: None,
            gender: None,
            updated_at: Utc::now(),
        }
    }
}

/// Medical specialization a doctor practices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specialization {
    pub id: Uuid,
    pub name: String,
}

impl Specialization {
    pub fn new(name: impl Into<String>) -> Self {
        Self { id: Uuid::new_v4(), name: name.into() }
    }
}

/// Profile of an account with the `doctor` role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorProfile {
    pub account_id: Uuid,
    pub name: String,
    pub specialization_id: Uuid,
    /// Practice license (STR) number
    pub license_number: String,
    pub experience_years: u32,
    /// Consultation fee in the smallest currency unit
    pub fee: i64,
    /// Whether the doctor currently accepts consultations
    pub is_online: bool,
    pub updated_at: DateTime<Utc>,
}

impl DoctorProfile {
    pub fn new(account_id: Uuid, name: String, specialization_id: Uuid, license_number: String) -> Self {
        Self {
            account_id,
            name,
            specialization_id,
            license_number,
            experience_years: 0,
            fee: 0,
            is_online: false,
            updated_at: Utc::now(),
        }
    }
}

/// Company record of a pharmacy-manager account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partner {
    pub account_id: Uuid,
    pub company_name: String,
    pub phone: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Partner {
    pub fn new(account_id: Uuid, company_name: String, phone: String, address: String) -> Self {
        let now = Utc::now();
        Self {
            account_id,
            company_name,
            phone,
            address,
            created_at: now,
            updated_at: now,
        }
    }
}
