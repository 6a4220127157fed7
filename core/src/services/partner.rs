//! Admin management of pharmacy-manager partners

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::account::{Account, Role};
use crate::domain::entities::profile::Partner;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{AccountRepository, PartnerRepository, PharmacyRepository};
use crate::services::auth::{validate_credentials, PasswordHasher};

#[derive(Debug, Clone)]
pub struct NewPartner {
    pub email: String,
    pub password: String,
    pub company_name: String,
    pub phone: String,
    pub address: String,
}

#[derive(Debug, Clone, Default)]
pub struct PartnerUpdate {
    pub company_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

pub struct PartnerService {
    accounts: Arc<dyn AccountRepository>,
    partners: Arc<dyn PartnerRepository>,
    pharmacies: Arc<dyn PharmacyRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

fn filled(value: &str, field: &str) -> DomainResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DomainError::validation(format!("{field} is required")));
    }
    Ok(value.to_string())
}

impl PartnerService {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        partners: Arc<dyn PartnerRepository>,
        pharmacies: Arc<dyn PharmacyRepository>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            accounts,
            partners,
            pharmacies,
            hasher,
        }
    }

    /// Create a pharmacy-manager account and its company record.
    ///
    /// Partner accounts are created by an admin and start verified.
    pub async fn create_partner(&self, input: NewPartner) -> DomainResult<Partner> {
        validate_credentials(&input.email, &input.password)?;
        let company_name = filled(&input.company_name, "Company name")?;
        let phone = filled(&input.phone, "Phone")?;
        let address = filled(&input.address, "Address")?;

        let hash = self.hasher.hash(&input.password).await?;
        let mut account = Account::new(&input.email, hash, Role::PharmacyManager);
        account.verify();
        let account = self.accounts.create(account).await?;

        let partner = self
            .partners
            .save(Partner::new(account.id, company_name, phone, address))
            .await?;
        tracing::info!(partner_id = %partner.account_id, "partner created");
        Ok(partner)
    }

    pub async fn list(&self) -> DomainResult<Vec<Partner>> {
        self.partners.list().await
    }

    pub async fn get(&self, partner_id: Uuid) -> DomainResult<Partner> {
        self.partners
            .find(partner_id)
            .await?
            .ok_or_else(|| DomainError::not_found("partner"))
    }

    pub async fn update(&self, partner_id: Uuid, update: PartnerUpdate) -> DomainResult<Partner> {
        let mut partner = self.get(partner_id).await?;
        if let Some(name) = update.company_name {
            partner.company_name = filled(&name, "Company name")?;
        }
        if let Some(phone) = update.phone {
            partner.phone = filled(&phone, "Phone")?;
        }
        if let Some(address) = update.address {
            partner.address = filled(&address, "Address")?;
        }
        partner.updated_at = Utc::now();
        self.partners.save(partner).await
    }

    /// Remove a partner and its account. Refused while it still owns pharmacies.
    pub async fn delete(&self, partner_id: Uuid) -> DomainResult<()> {
        self.get(partner_id).await?;

        if !self.pharmacies.list_by_manager(partner_id).await?.is_empty() {
            return Err(DomainError::conflict("Partner still manages pharmacies"));
        }

        self.partners.delete(partner_id).await?;
        self.accounts.delete(partner_id).await?;
        tracing::info!(partner_id = %partner_id, "partner deleted");
        Ok(())
    }
}
