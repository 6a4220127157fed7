//! Integration tests for startup seeding against the in-memory repositories

use hc_core::repositories::{
    AccountRepository, CatalogRepository, InMemoryAccountRepository, InMemoryCatalogRepository,
    InMemoryProfileRepository, ProfileRepository,
};
use hc_core::services::auth::PasswordHasher;
use hc_core::{Account, Role};
use hc_infra::seed::{seed_admin, seed_reference_data, AdminCredentials, ADMIN_EMAIL, ADMIN_PASSWORD};
use hc_infra::BcryptHasher;

fn credentials(email: &str, password: &str) -> Option<AdminCredentials> {
    Some(AdminCredentials {
        email: email.to_string(),
        password: password.to_string(),
    })
}

#[tokio::test]
async fn test_reference_data_is_seeded_once() {
    let profiles = InMemoryProfileRepository::default();
    let catalog = InMemoryCatalogRepository::default();

    let first = seed_reference_data(&profiles, &catalog).await.unwrap();
    assert!(first.specializations > 0);
    assert!(first.forms > 0);
    assert!(first.categories > 0);

    let second = seed_reference_data(&profiles, &catalog).await.unwrap();
    assert_eq!(second.specializations, 0);
    assert_eq!(second.forms, 0);
    assert_eq!(second.classifications, 0);
    assert_eq!(second.categories, 0);

    assert_eq!(profiles.list_specializations().await.unwrap().len(), first.specializations);
    let classifications = catalog.list_classifications().await.unwrap();
    assert!(classifications.iter().any(|c| c.requires_prescription));
    assert!(classifications.iter().any(|c| !c.requires_prescription));
}

#[tokio::test]
async fn test_admin_is_created_verified() {
    let accounts = InMemoryAccountRepository::default();
    let hasher = BcryptHasher::new(4);

    let admin = seed_admin(&accounts, &hasher, credentials(" Root@Example.com ", "s3cret-pass"))
        .await
        .unwrap()
        .expect("admin created");

    assert_eq!(admin.email, "root@example.com");
    assert_eq!(admin.role, Role::Admin);
    assert!(admin.is_verified);

    let stored = accounts.find_by_email("root@example.com").await.unwrap().unwrap();
    assert!(hasher.verify("s3cret-pass", &stored.password_hash).await.unwrap());
}

#[tokio::test]
async fn test_admin_seed_is_idempotent() {
    let accounts = InMemoryAccountRepository::default();
    let hasher = BcryptHasher::new(4);

    seed_admin(&accounts, &hasher, credentials("root@example.com", "s3cret-pass"))
        .await
        .unwrap();
    let again = seed_admin(&accounts, &hasher, credentials("root@example.com", "other-pass"))
        .await
        .unwrap();
    assert!(again.is_none());
}

#[tokio::test]
async fn test_existing_non_admin_is_left_alone() {
    let accounts = InMemoryAccountRepository::default();
    let hasher = BcryptHasher::new(4);
    accounts
        .create(Account::new("root@example.com", "x".into(), Role::User))
        .await
        .unwrap();

    let created = seed_admin(&accounts, &hasher, credentials("root@example.com", "s3cret-pass"))
        .await
        .unwrap();
    assert!(created.is_none());

    let stored = accounts.find_by_email("root@example.com").await.unwrap().unwrap();
    assert_eq!(stored.role, Role::User);
}

#[tokio::test]
async fn test_no_credentials_skips_admin() {
    let accounts = InMemoryAccountRepository::default();
    let hasher = BcryptHasher::new(4);
    assert!(seed_admin(&accounts, &hasher, None).await.unwrap().is_none());
}

#[test]
fn test_credentials_need_both_variables() {
    let only_email = AdminCredentials::from_lookup(|key| {
        (key == ADMIN_EMAIL).then(|| "root@example.com".to_string())
    });
    assert!(only_email.is_none());

    let both = AdminCredentials::from_lookup(|key| match key {
        ADMIN_EMAIL => Some("root@example.com".to_string()),
        ADMIN_PASSWORD => Some("pw".to_string()),
        _ => None,
    });
    assert_eq!(both.unwrap().email, "root@example.com");
}
