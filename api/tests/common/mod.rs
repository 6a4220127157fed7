//! Shared fixtures for the HTTP integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::web;
use async_trait::async_trait;
use hc_api::state::{AppState, Ports, Repositories};
use hc_core::errors::DomainError;
use hc_core::services::Mailer;
use hc_core::{Role, TokenPurpose};
use hc_infra::{AdminCredentials, BcryptHasher, FlatRateShipping};
use hc_shared::config::keys;
use hc_shared::Settings;
use uuid::Uuid;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "admin-password";

pub fn test_settings() -> Settings {
    let vars: HashMap<&str, &str> = HashMap::from([
        (keys::PORT, "0"),
        (keys::FE_PORT, "3000"),
        (keys::JWT_ISSUER, "healthcare-test"),
        (keys::VERIFICATION_SECRET, "test-verification"),
        (keys::ACCESS_SECRET, "test-access"),
        (keys::REFRESH_SECRET, "test-refresh"),
        (keys::RESET_PASSWORD_SECRET, "test-reset"),
        (keys::HASH_COST, "4"),
        (keys::GRACEFUL_PERIOD, "1"),
    ]);
    Settings::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap()
}

/// Mailer keeping every token it was asked to send
#[derive(Default)]
pub struct CapturingMailer {
    verifications: Mutex<Vec<(String, String)>>,
    resets: Mutex<Vec<(String, String)>>,
}

impl CapturingMailer {
    pub fn verification_token(&self, to: &str) -> Option<String> {
        let sent = self.verifications.lock().unwrap();
        sent.iter().rev().find(|(email, _)| email == to).map(|(_, t)| t.clone())
    }

    pub fn reset_token(&self, to: &str) -> Option<String> {
        let sent = self.resets.lock().unwrap();
        sent.iter().rev().find(|(email, _)| email == to).map(|(_, t)| t.clone())
    }
}

#[async_trait]
impl Mailer for CapturingMailer {
    async fn send_verification(&self, to: &str, token: &str) -> Result<(), DomainError> {
        self.verifications
            .lock()
            .unwrap()
            .push((to.to_string(), token.to_string()));
        Ok(())
    }

    async fn send_password_reset(&self, to: &str, token: &str) -> Result<(), DomainError> {
        self.resets.lock().unwrap().push((to.to_string(), token.to_string()));
        Ok(())
    }
}

pub struct TestApp {
    pub state: web::Data<AppState>,
    pub mailer: Arc<CapturingMailer>,
}

impl TestApp {
    /// Fresh in-memory state, seeded with reference data and an admin
    pub async fn new() -> Self {
        let mailer = Arc::new(CapturingMailer::default());
        let ports = Ports {
            hasher: Arc::new(BcryptHasher::new(4)),
            mailer: mailer.clone(),
            shipping: Arc::new(FlatRateShipping::new(String::new())),
        };
        let state = AppState::assemble(
            test_settings(),
            Repositories::in_memory(),
            ports,
            Duration::from_millis(500),
        );
        state
            .seed(Some(AdminCredentials {
                email: ADMIN_EMAIL.to_string(),
                password: ADMIN_PASSWORD.to_string(),
            }))
            .await
            .unwrap();

        Self {
            state: web::Data::new(state),
            mailer,
        }
    }

    /// A signed token for an account that need not exist
    pub fn token(&self, purpose: TokenPurpose, role: Role) -> String {
        self.state.tokens.issue(purpose, Uuid::new_v4(), role).unwrap()
    }

    pub fn access_token(&self, role: Role) -> String {
        self.token(TokenPurpose::Access, role)
    }
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}
