//! Patient and doctor profiles, doctor directory and availability

use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::profile::{DoctorProfile, Gender, Specialization, UserProfile};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::ProfileRepository;

/// Partial update of a patient profile. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UserProfileUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<Gender>,
}

/// Partial update of a doctor profile
#[derive(Debug, Clone, Default)]
pub struct DoctorProfileUpdate {
    pub name: Option<String>,
    pub specialization_id: Option<Uuid>,
    pub license_number: Option<String>,
    pub experience_years: Option<u32>,
    pub fee: Option<i64>,
}

/// Doctor directory filter
#[derive(Debug, Clone, Copy, Default)]
pub struct DoctorFilter {
    pub specialization_id: Option<Uuid>,
    pub online_only: bool,
}

pub struct ProfileService {
    profiles: Arc<dyn ProfileRepository>,
}

fn non_blank(value: String, field: &str) -> DomainResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{field} must not be blank")));
    }
    Ok(trimmed.to_string())
}

impl ProfileService {
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    pub async fn user_profile(&self, account_id: Uuid) -> DomainResult<UserProfile> {
        self.profiles
            .find_user_profile(account_id)
            .await?
            .ok_or_else(|| DomainError::not_found("user profile"))
    }

    pub async fn update_user_profile(
        &self,
        account_id: Uuid,
        update: UserProfileUpdate,
    ) -> DomainResult<UserProfile> {
        let mut profile = self.user_profile(account_id).await?;

        if let Some(name) = update.name {
            profile.name = non_blank(name, "Name")?;
        }
        if let Some(phone) = update.phone {
            profile.phone = Some(non_blank(phone, "Phone")?);
        }
        if let Some(birth_date) = update.birth_date {
            if birth_date > Utc::now().date_naive() {
                return Err(DomainError::validation("Birth date cannot be in the future"));
            }
            profile.birth_date = Some(birth_date);
        }
        if update.gender.is_some() {
            profile.gender = update.gender;
        }
        profile.updated_at = Utc::now();

        self.profiles.save_user_profile(profile).await
    }

    pub async fn doctor_profile(&self, account_id: Uuid) -> DomainResult<DoctorProfile> {
        self.profiles
            .find_doctor_profile(account_id)
            .await?
            .ok_or_else(|| DomainError::not_found("doctor"))
    }

    pub async fn update_doctor_profile(
        &self,
        account_id: Uuid,
        update: DoctorProfileUpdate,
    ) -> DomainResult<DoctorProfile> {
        let mut profile = self.doctor_profile(account_id).await?;

        if let Some(name) = update.name {
            profile.name = non_blank(name, "Name")?;
        }
        if let Some(specialization_id) = update.specialization_id {
            if self.profiles.find_specialization(specialization_id).await?.is_none() {
                return Err(DomainError::validation("Unknown specialization"));
            }
            profile.specialization_id = specialization_id;
        }
        if let Some(license_number) = update.license_number {
            profile.license_number = non_blank(license_number, "License number")?;
        }
        if let Some(years) = update.experience_years {
            profile.experience_years = years;
        }
        if let Some(fee) = update.fee {
            if fee < 0 {
                return Err(DomainError::validation("Fee cannot be negative"));
            }
            profile.fee = fee;
        }
        profile.updated_at = Utc::now();

        self.profiles.save_doctor_profile(profile).await
    }

    /// Toggle whether the doctor accepts new consultations
    pub async fn set_doctor_online(&self, account_id: Uuid, online: bool) -> DomainResult<DoctorProfile> {
        let mut profile = self.doctor_profile(account_id).await?;
        profile.is_online = online;
        profile.updated_at = Utc::now();
        tracing::debug!(doctor_id = %account_id, online, "doctor availability changed");
        self.profiles.save_doctor_profile(profile).await
    }

    pub async fn list_doctors(&self, filter: DoctorFilter) -> DomainResult<Vec<DoctorProfile>> {
        let doctors = self.profiles.list_doctor_profiles().await?;
        Ok(doctors
            .into_iter()
            .filter(|d| filter.specialization_id.map_or(true, |s| d.specialization_id == s))
            .filter(|d| !filter.online_only || d.is_online)
            .collect())
    }

    pub async fn doctor(&self, doctor_id: Uuid) -> DomainResult<DoctorProfile> {
        self.doctor_profile(doctor_id).await
    }

    pub async fn specializations(&self) -> DomainResult<Vec<Specialization>> {
        self.profiles.list_specializations().await
    }
}
