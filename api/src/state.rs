//! Composition root
//!
//! Builds the immutable dependency graph once at startup: repositories,
//! adapters for the core ports, and every use-case service. Handlers reach
//! it through `web::Data<AppState>`.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use hc_core::errors::DomainResult;
use hc_core::repositories::{
    AccountRepository, AddressRepository, CartRepository, CatalogRepository, ChatRepository,
    InMemoryAccountRepository, InMemoryAddressRepository, InMemoryCartRepository, InMemoryCatalogRepository,
    InMemoryChatRepository, InMemoryOrderRepository, InMemoryPartnerRepository, InMemoryPharmacyRepository,
    InMemoryProfileRepository, OrderRepository, PartnerRepository, PharmacyRepository, ProfileRepository,
};
use hc_core::services::{
    AddressService, AuthService, CartService, CatalogService, Mailer, OrderService, PartnerService,
    PasswordHasher, PharmacyService, ProfileService, ReportService, ShippingRates, TelemedicineService,
    TokenService, TokenServiceConfig, DEFAULT_LISTEN_TIMEOUT,
};
use hc_infra::{seed_admin, seed_reference_data, AdminCredentials, BcryptHasher, FlatRateShipping, LogMailer};
use hc_shared::Settings;

use crate::middleware::InFlightTracker;

/// Storage behind every service
#[derive(Clone)]
pub struct Repositories {
    pub accounts: Arc<dyn AccountRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub partners: Arc<dyn PartnerRepository>,
    pub addresses: Arc<dyn AddressRepository>,
    pub catalog: Arc<dyn CatalogRepository>,
    pub pharmacies: Arc<dyn PharmacyRepository>,
    pub carts: Arc<dyn CartRepository>,
    pub chats: Arc<dyn ChatRepository>,
    pub orders: Arc<dyn OrderRepository>,
}

impl Repositories {
    pub fn in_memory() -> Self {
        Self {
            accounts: Arc::new(InMemoryAccountRepository::default()),
            profiles: Arc::new(InMemoryProfileRepository::default()),
            partners: Arc::new(InMemoryPartnerRepository::default()),
            addresses: Arc::new(InMemoryAddressRepository::default()),
            catalog: Arc::new(InMemoryCatalogRepository::default()),
            pharmacies: Arc::new(InMemoryPharmacyRepository::default()),
            carts: Arc::new(InMemoryCartRepository::default()),
            chats: Arc::new(InMemoryChatRepository::default()),
            orders: Arc::new(InMemoryOrderRepository::default()),
        }
    }
}

/// Adapters for the outbound ports
#[derive(Clone)]
pub struct Ports {
    pub hasher: Arc<dyn PasswordHasher>,
    pub mailer: Arc<dyn Mailer>,
    pub shipping: Arc<dyn ShippingRates>,
}

impl Ports {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            hasher: Arc::new(BcryptHasher::new(settings.hash_cost)),
            mailer: Arc::new(LogMailer::new(settings.email.clone(), settings.server.frontend_url())),
            shipping: Arc::new(FlatRateShipping::new(settings.shipping_api_key.clone())),
        }
    }
}

/// Process start time and request counters for the profiling endpoints
#[derive(Debug)]
pub struct Diagnostics {
    pub started_at: DateTime<Utc>,
    started: Instant,
    pub requests: Arc<InFlightTracker>,
}

impl Diagnostics {
    fn new() -> Self {
        Self {
            started_at: Utc::now(),
            started: Instant::now(),
            requests: Arc::new(InFlightTracker::default()),
        }
    }

    pub fn uptime(&self) -> Duration {
        self.started.elapsed()
    }
}

pub struct AppState {
    pub settings: Arc<Settings>,
    pub repositories: Repositories,
    pub ports: Ports,
    pub tokens: Arc<TokenService>,
    pub auth: Arc<AuthService>,
    pub profiles: Arc<ProfileService>,
    pub partners: Arc<PartnerService>,
    pub addresses: Arc<AddressService>,
    pub catalog: Arc<CatalogService>,
    pub pharmacies: Arc<PharmacyService>,
    pub carts: Arc<CartService>,
    pub orders: Arc<OrderService>,
    pub telemedicine: Arc<TelemedicineService>,
    pub reports: Arc<ReportService>,
    pub diagnostics: Arc<Diagnostics>,
}

impl AppState {
    /// Production wiring: in-memory storage and the infra adapters
    pub fn build(settings: Settings) -> Self {
        let ports = Ports::from_settings(&settings);
        Self::assemble(settings, Repositories::in_memory(), ports, DEFAULT_LISTEN_TIMEOUT)
    }

    pub fn assemble(settings: Settings, repos: Repositories, ports: Ports, listen_timeout: Duration) -> Self {
        let tokens = Arc::new(TokenService::new(TokenServiceConfig::from_settings(&settings)));
        let telemedicine = Arc::new(
            TelemedicineService::new(repos.chats.clone(), repos.profiles.clone(), repos.catalog.clone())
                .with_listen_timeout(listen_timeout),
        );

        Self {
            auth: Arc::new(AuthService::new(
                repos.accounts.clone(),
                repos.profiles.clone(),
                tokens.clone(),
                ports.hasher.clone(),
                ports.mailer.clone(),
            )),
            profiles: Arc::new(ProfileService::new(repos.profiles.clone())),
            partners: Arc::new(PartnerService::new(
                repos.accounts.clone(),
                repos.partners.clone(),
                repos.pharmacies.clone(),
                ports.hasher.clone(),
            )),
            addresses: Arc::new(AddressService::new(repos.addresses.clone())),
            catalog: Arc::new(CatalogService::new(repos.catalog.clone(), repos.pharmacies.clone())),
            pharmacies: Arc::new(PharmacyService::new(repos.pharmacies.clone(), repos.catalog.clone())),
            carts: Arc::new(CartService::new(
                repos.carts.clone(),
                repos.pharmacies.clone(),
                repos.catalog.clone(),
                telemedicine.clone(),
            )),
            orders: Arc::new(OrderService::new(
                repos.orders.clone(),
                repos.carts.clone(),
                repos.addresses.clone(),
                repos.pharmacies.clone(),
                repos.catalog.clone(),
                ports.shipping.clone(),
            )),
            reports: Arc::new(ReportService::new(repos.orders.clone(), repos.pharmacies.clone())),
            telemedicine,
            tokens,
            settings: Arc::new(settings),
            repositories: repos,
            ports,
            diagnostics: Arc::new(Diagnostics::new()),
        }
    }

    /// Load reference data and the optional bootstrap admin
    pub async fn seed(&self, admin: Option<AdminCredentials>) -> DomainResult<()> {
        let repos = &self.repositories;
        seed_reference_data(repos.profiles.as_ref(), repos.catalog.as_ref()).await?;
        seed_admin(repos.accounts.as_ref(), self.ports.hasher.as_ref(), admin).await?;
        Ok(())
    }
}
