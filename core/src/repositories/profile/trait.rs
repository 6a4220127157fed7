//! Profile and partner repository traits.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::profile::{DoctorProfile, Partner, Specialization, UserProfile};
use crate::errors::DomainError;

/// Persistence of role-specific profiles and the specialization list
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find_user_profile(&self, account_id: Uuid) -> Result<Option<UserProfile>, DomainError>;

    /// Insert or replace a user profile
    async fn save_user_profile(&self, profile: UserProfile) -> Result<UserProfile, DomainError>;

    async fn find_doctor_profile(&self, account_id: Uuid) -> Result<Option<DoctorProfile>, DomainError>;

    /// Insert or replace a doctor profile
    async fn save_doctor_profile(&self, profile: DoctorProfile) -> Result<DoctorProfile, DomainError>;

    /// All doctor profiles, ordered by name
    async fn list_doctor_profiles(&self) -> Result<Vec<DoctorProfile>, DomainError>;

    /// All specializations, ordered by name
    async fn list_specializations(&self) -> Result<Vec<Specialization>, DomainError>;

    async fn find_specialization(&self, id: Uuid) -> Result<Option<Specialization>, DomainError>;

    async fn save_specialization(&self, specialization: Specialization) -> Result<Specialization, DomainError>;
}

/// Persistence of pharmacy-manager company records
#[async_trait]
pub trait PartnerRepository: Send + Sync {
    async fn find(&self, account_id: Uuid) -> Result<Option<Partner>, DomainError>;

    /// All partners, newest first
    async fn list(&self) -> Result<Vec<Partner>, DomainError>;

    /// Insert or replace a partner
    async fn save(&self, partner: Partner) -> Result<Partner, DomainError>;

    /// Delete a partner. Returns whether it existed.
    async fn delete(&self, account_id: Uuid) -> Result<bool, DomainError>;
}
