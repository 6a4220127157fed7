//! User shipping addresses and the main-address rule
//!
//! An account has at most one main address. Its first address becomes main,
//! and deleting the main address promotes the most recently created one
//! that remains.

use chrono::Utc;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::entities::address::Address;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::AddressRepository;

#[derive(Debug, Clone)]
pub struct AddressInput {
    pub label: String,
    pub recipient: String,
    pub phone: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub postal_code: String,
    /// Make this the main address
    pub is_main: bool,
}

impl AddressInput {
    fn validate(&self) -> DomainResult<()> {
        let fields = [
            (&self.label, "Label"),
            (&self.recipient, "Recipient"),
            (&self.phone, "Phone"),
            (&self.street, "Street"),
            (&self.city, "City"),
            (&self.province, "Province"),
            (&self.postal_code, "Postal code"),
        ];
        for (value, name) in fields {
            if value.trim().is_empty() {
                return Err(DomainError::validation(format!("{name} is required")));
            }
        }
        Ok(())
    }

    fn apply(self, address: &mut Address) {
        address.label = self.label.trim().to_string();
        address.recipient = self.recipient.trim().to_string();
        address.phone = self.phone.trim().to_string();
        address.street = self.street.trim().to_string();
        address.city = self.city.trim().to_string();
        address.province = self.province.trim().to_string();
        address.postal_code = self.postal_code.trim().to_string();
    }
}

pub struct AddressService {
    addresses: Arc<dyn AddressRepository>,
    // Serializes read-modify-write sequences touching the main flag
    write_lock: Mutex<()>,
}

impl AddressService {
    pub fn new(addresses: Arc<dyn AddressRepository>) -> Self {
        Self {
            addresses,
            write_lock: Mutex::new(()),
        }
    }

    pub async fn list(&self, account_id: Uuid) -> DomainResult<Vec<Address>> {
        self.addresses.list_by_account(account_id).await
    }

    /// Address owned by the account. Foreign addresses are reported as missing.
    pub async fn owned(&self, account_id: Uuid, address_id: Uuid) -> DomainResult<Address> {
        match self.addresses.find(address_id).await? {
            Some(address) if address.account_id == account_id => Ok(address),
            _ => Err(DomainError::not_found("address")),
        }
    }

    pub async fn create(&self, account_id: Uuid, input: AddressInput) -> DomainResult<Address> {
        input.validate()?;
        let _guard = self.write_lock.lock().await;

        let existing = self.addresses.list_by_account(account_id).await?;
        let is_main = input.is_main || existing.is_empty();
        let mut address = Address {
            id: Uuid::new_v4(),
            account_id,
            label: String::new(),
            recipient: String::new(),
            phone: String::new(),
            street: String::new(),
            city: String::new(),
            province: String::new(),
            postal_code: String::new(),
            is_main,
            created_at: Utc::now(),
        };
        input.apply(&mut address);

        if is_main {
            self.demote_all(existing).await?;
        }
        self.addresses.save(address).await
    }

    pub async fn update(&self, account_id: Uuid, address_id: Uuid, input: AddressInput) -> DomainResult<Address> {
        input.validate()?;
        let _guard = self.write_lock.lock().await;

        let mut address = self.owned(account_id, address_id).await?;
        let promote = input.is_main && !address.is_main;
        input.apply(&mut address);

        if promote {
            let others = self.addresses.list_by_account(account_id).await?;
            self.demote_all(others).await?;
            address.is_main = true;
        }
        self.addresses.save(address).await
    }

    pub async fn delete(&self, account_id: Uuid, address_id: Uuid) -> DomainResult<()> {
        let _guard = self.write_lock.lock().await;

        let address = self.owned(account_id, address_id).await?;
        self.addresses.delete(address.id).await?;

        if address.is_main {
            let remaining = self.addresses.list_by_account(account_id).await?;
            if let Some(mut newest) = remaining.into_iter().max_by_key(|a| a.created_at) {
                newest.is_main = true;
                self.addresses.save(newest).await?;
            }
        }
        Ok(())
    }

    pub async fn set_main(&self, account_id: Uuid, address_id: Uuid) -> DomainResult<Address> {
        let _guard = self.write_lock.lock().await;

        let mut address = self.owned(account_id, address_id).await?;
        if address.is_main {
            return Ok(address);
        }
        let all = self.addresses.list_by_account(account_id).await?;
        self.demote_all(all).await?;
        address.is_main = true;
        self.addresses.save(address).await
    }

    async fn demote_all(&self, addresses: Vec<Address>) -> DomainResult<()> {
        for mut address in addresses.into_iter().filter(|a| a.is_main) {
            address.is_main = false;
            self.addresses.save(address).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryAddressRepository;

    fn input(label: &str, is_main: bool) -> AddressInput {
        AddressInput {
            label: label.into(),
            recipient: "Rina".into(),
            phone: "0812".into(),
            street: "Jl. Merdeka 10".into(),
            city: "Bandung".into(),
            province: "Jawa Barat".into(),
            postal_code: "40111".into(),
            is_main,
        }
    }

    fn mains(list: &[Address]) -> Vec<&str> {
        list.iter().filter(|a| a.is_main).map(|a| a.label.as_str()).collect()
    }

    #[tokio::test]
    async fn test_first_address_becomes_main() {
        let service = AddressService::new(Arc::new(InMemoryAddressRepository::new()));
        let user = Uuid::new_v4();

        let home = service.create(user, input("Home", false)).await.unwrap();
        assert!(home.is_main);
        let office = service.create(user, input("Office", false)).await.unwrap();
        assert!(!office.is_main);

        let list = service.list(user).await.unwrap();
        assert_eq!(mains(&list), vec!["Home"]);
    }

    #[tokio::test]
    async fn test_single_main_address() {
        let service = AddressService::new(Arc::new(InMemoryAddressRepository::new()));
        let user = Uuid::new_v4();
        service.create(user, input("Home", false)).await.unwrap();
        let office = service.create(user, input("Office", true)).await.unwrap();
        assert_eq!(mains(&service.list(user).await.unwrap()), vec!["Office"]);

        let gym = service.create(user, input("Gym", false)).await.unwrap();
        service.set_main(user, gym.id).await.unwrap();
        assert_eq!(mains(&service.list(user).await.unwrap()), vec!["Gym"]);

        service.update(user, office.id, input("Office 2", true)).await.unwrap();
        assert_eq!(mains(&service.list(user).await.unwrap()), vec!["Office 2"]);
    }

    #[tokio::test]
    async fn test_deleting_main_promotes_newest() {
        let service = AddressService::new(Arc::new(InMemoryAddressRepository::new()));
        let user = Uuid::new_v4();
        let home = service.create(user, input("Home", false)).await.unwrap();
        for label in ["Office", "Gym"] {
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
            service.create(user, input(label, false)).await.unwrap();
        }

        service.delete(user, home.id).await.unwrap();
        assert_eq!(mains(&service.list(user).await.unwrap()), vec!["Gym"]);
    }

    #[tokio::test]
    async fn test_foreign_address_not_found() {
        let service = AddressService::new(Arc::new(InMemoryAddressRepository::new()));
        let owner = Uuid::new_v4();
        let address = service.create(owner, input("Home", false)).await.unwrap();

        let stranger = Uuid::new_v4();
        assert!(matches!(
            service.delete(stranger, address.id).await.unwrap_err(),
            DomainError::NotFound { .. }
        ));
        assert!(service.set_main(stranger, address.id).await.is_err());
    }

    #[tokio::test]
    async fn test_blank_fields_rejected() {
        let service = AddressService::new(Arc::new(InMemoryAddressRepository::new()));
        let mut bad = input("Home", false);
        bad.city = " ".into();
        assert!(matches!(
            service.create(Uuid::new_v4(), bad).await.unwrap_err(),
            DomainError::Validation { .. }
        ));
    }
}
