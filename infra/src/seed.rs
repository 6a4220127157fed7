//! Startup seed data
//!
//! Reference tables (specializations, drug forms, drug classifications and
//! a starter set of categories) are filled on every boot; entries that are
//! already present are left alone, so seeding is safe to repeat. A bootstrap
//! admin account is created only when both admin variables are set.

use std::fmt;

use hc_core::errors::{DomainError, DomainResult};
use hc_core::repositories::{AccountRepository, CatalogRepository, ProfileRepository};
use hc_core::services::auth::PasswordHasher;
use hc_core::{normalize_email, Account, Category, DrugClassification, DrugForm, Role, Specialization};
use tracing::{info, warn};

pub const ADMIN_EMAIL: &str = "ADMIN_EMAIL";
pub const ADMIN_PASSWORD: &str = "ADMIN_PASSWORD";

const SPECIALIZATIONS: &[&str] = &[
    "General Practitioner",
    "Pediatrics",
    "Internal Medicine",
    "Dermatology",
    "Obstetrics and Gynecology",
    "Psychiatry",
    "Dentistry",
    "Cardiology",
    "Ear, Nose and Throat",
];

const DRUG_FORMS: &[&str] = &[
    "Tablet", "Capsule", "Syrup", "Suspension", "Ointment", "Cream", "Drops", "Injection", "Powder",
];

/// Name and whether a prescription is required
const CLASSIFICATIONS: &[(&str, bool)] = &[
    ("Over the Counter", false),
    ("Limited Over the Counter", false),
    ("Prescription Only", true),
    ("Herbal", false),
];

const CATEGORIES: &[&str] = &[
    "Pain Relief",
    "Cold and Flu",
    "Vitamins and Supplements",
    "Digestive Health",
    "Antibiotics",
    "Skin Care",
];

/// Counts of rows inserted by [`seed_reference_data`]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub specializations: usize,
    pub forms: usize,
    pub classifications: usize,
    pub categories: usize,
}

/// Credentials of the bootstrap admin account
#[derive(Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl AdminCredentials {
    /// Read admin credentials from the process environment
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Both variables must be present and non-blank
    pub fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let email = lookup(ADMIN_EMAIL).filter(|v| !v.trim().is_empty())?;
        let password = lookup(ADMIN_PASSWORD).filter(|v| !v.is_empty())?;
        Some(Self { email, password })
    }
}

/// Insert any missing reference rows
pub async fn seed_reference_data(
    profiles: &dyn ProfileRepository,
    catalog: &dyn CatalogRepository,
) -> DomainResult<SeedReport> {
    let mut report = SeedReport::default();

    let existing = names(profiles.list_specializations().await?.into_iter().map(|s| s.name));
    for name in SPECIALIZATIONS.iter().filter(|n| !contains(&existing, n)) {
        profiles.save_specialization(Specialization::new(*name)).await?;
        report.specializations += 1;
    }

    let existing = names(catalog.list_forms().await?.into_iter().map(|f| f.name));
    for name in DRUG_FORMS.iter().filter(|n| !contains(&existing, n)) {
        catalog.save_form(DrugForm::new(*name)).await?;
        report.forms += 1;
    }

    let existing = names(catalog.list_classifications().await?.into_iter().map(|c| c.name));
    for (name, prescription) in CLASSIFICATIONS.iter().filter(|(n, _)| !contains(&existing, n)) {
        catalog
            .save_classification(DrugClassification::new(*name, *prescription))
            .await?;
        report.classifications += 1;
    }

    // Categories are admin-managed, so only a fresh catalog gets the starter set
    if catalog.list_categories().await?.is_empty() {
        for name in CATEGORIES {
            catalog.save_category(Category::new(*name)).await?;
            report.categories += 1;
        }
    }

    info!(
        specializations = report.specializations,
        forms = report.forms,
        classifications = report.classifications,
        categories = report.categories,
        "reference data seeded"
    );
    Ok(report)
}

/// Create the bootstrap admin account if it does not exist yet.
///
/// Returns the created account, or `None` when no credentials were given or
/// the address is already taken.
pub async fn seed_admin(
    accounts: &dyn AccountRepository,
    hasher: &dyn PasswordHasher,
    credentials: Option<AdminCredentials>,
) -> DomainResult<Option<Account>> {
    let Some(credentials) = credentials else {
        info!("no bootstrap admin configured");
        return Ok(None);
    };

    let email = normalize_email(&credentials.email);
    if !email.contains('@') {
        return Err(DomainError::validation(format!("{ADMIN_EMAIL} is not an e-mail address")));
    }

    if let Some(existing) = accounts.find_by_email(&email).await? {
        if existing.role != Role::Admin {
            warn!(account_id = %existing.id, role = %existing.role, "bootstrap admin e-mail belongs to a non-admin account");
        }
        return Ok(None);
    }

    let hash = hasher.hash(&credentials.password).await?;
    let mut account = Account::new(&email, hash, Role::Admin);
    account.verify();
    let account = accounts.create(account).await?;

    info!(account_id = %account.id, "bootstrap admin created");
    Ok(Some(account))
}

fn names(iter: impl Iterator<Item = String>) -> Vec<String> {
    iter.map(|n| n.to_lowercase()).collect()
}

fn contains(existing: &[String], name: &str) -> bool {
    existing.iter().any(|n| n == &name.to_lowercase())
}
