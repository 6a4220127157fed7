//! In-memory implementations of ProfileRepository and PartnerRepository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::profile::{DoctorProfile, Partner, Specialization, UserProfile};
use crate::errors::DomainError;

use super::trait_::{PartnerRepository, ProfileRepository};

#[derive(Default)]
struct ProfileState {
    users: HashMap<Uuid, UserProfile>,
    doctors: HashMap<Uuid, DoctorProfile>,
    specializations: HashMap<Uuid, Specialization>,
}

/// In-memory profile repository
#[derive(Clone, Default)]
pub struct InMemoryProfileRepository {
    state: Arc<RwLock<ProfileState>>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn find_user_profile(&self, account_id: Uuid) -> Result<Option<UserProfile>, DomainError> {
        Ok(self.state.read().await.users.get(&account_id).cloned())
    }

    async fn save_user_profile(&self, profile: UserProfile) -> Result<UserProfile, DomainError> {
        let mut state = self.state.write().await;
        state.users.insert(profile.account_id, profile.clone());
        Ok(profile)
    }

    async fn find_doctor_profile(&self, account_id: Uuid) -> Result<Option<DoctorProfile>, DomainError> {
        Ok(self.state.read().await.doctors.get(&account_id).cloned())
    }

    async fn save_doctor_profile(&self, profile: DoctorProfile) -> Result<DoctorProfile, DomainError> {
        let mut state = self.state.write().await;
        state.doctors.insert(profile.account_id, profile.clone());
        Ok(profile)
    }

    async fn list_doctor_profiles(&self) -> Result<Vec<DoctorProfile>, DomainError> {
        let state = self.state.read().await;
        let mut doctors: Vec<_> = state.doctors.values().cloned().collect();
        doctors.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(doctors)
    }

    async fn list_specializations(&self) -> Result<Vec<Specialization>, DomainError> {
        let state = self.state.read().await;
        let mut specializations: Vec<_> = state.specializations.values().cloned().collect();
        specializations.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(specializations)
    }

    async fn find_specialization(&self, id: Uuid) -> Result<Option<Specialization>, DomainError> {
        Ok(self.state.read().await.specializations.get(&id).cloned())
    }

    async fn save_specialization(&self, specialization: Specialization) -> Result<Specialization, DomainError> {
        let mut state = self.state.write().await;
        if state
            .specializations
            .values()
            .any(|s| s.id != specialization.id && s.name.eq_ignore_ascii_case(&specialization.name))
        {
            return Err(DomainError::conflict("Specialization already exists"));
        }
        state.specializations.insert(specialization.id, specialization.clone());
        Ok(specialization)
    }
}

/// In-memory partner repository
#[derive(Clone, Default)]
pub struct InMemoryPartnerRepository {
    partners: Arc<RwLock<HashMap<Uuid, Partner>>>,
}

impl InMemoryPartnerRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PartnerRepository for InMemoryPartnerRepository {
    async fn find(&self, account_id: Uuid) -> Result<Option<Partner>, DomainError> {
        Ok(self.partners.read().await.get(&account_id).cloned())
    }

    async fn list(&self) -> Result<Vec<Partner>, DomainError> {
        let partners = self.partners.read().await;
        let mut list: Vec<_> = partners.values().cloned().collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(list)
    }

    async fn save(&self, partner: Partner) -> Result<Partner, DomainError> {
        let mut partners = self.partners.write().await;
        partners.insert(partner.account_id, partner.clone());
        Ok(partner)
    }

    async fn delete(&self, account_id: Uuid) -> Result<bool, DomainError> {
        Ok(self.partners.write().await.remove(&account_id).is_some())
    }
}
