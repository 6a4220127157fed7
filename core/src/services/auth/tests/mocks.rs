//! Test doubles for the authentication ports

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::errors::DomainError;
use crate::services::auth::{Mailer, PasswordHasher};

/// Reversible "hash" keeping tests fast
pub(crate) struct PlainHasher;

#[async_trait]
impl PasswordHasher for PlainHasher {
    async fn hash(&self, password: &str) -> Result<String, DomainError> {
        Ok(format!("plain:{password}"))
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        Ok(hash == format!("plain:{password}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SentMail {
    Verification { to: String, token: String },
    PasswordReset { to: String, token: String },
}

/// Mailer capturing every message instead of sending it
#[derive(Clone, Default)]
pub(crate) struct RecordingMailer {
    pub sent: Arc<Mutex<Vec<SentMail>>>,
}

impl RecordingMailer {
    pub fn last_verification_token(&self) -> Option<String> {
        self.sent.lock().unwrap().iter().rev().find_map(|m| match m {
            SentMail::Verification { token, .. } => Some(token.clone()),
            _ => None,
        })
    }

    pub fn last_reset_token(&self) -> Option<String> {
        self.sent.lock().unwrap().iter().rev().find_map(|m| match m {
            SentMail::PasswordReset { token, .. } => Some(token.clone()),
            _ => None,
        })
    }

    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send_verification(&self, to: &str, token: &str) -> Result<(), DomainError> {
        self.sent.lock().unwrap().push(SentMail::Verification {
            to: to.to_string(),
            token: token.to_string(),
        });
        Ok(())
    }

    async fn send_password_reset(&self, to: &str, token: &str) -> Result<(), DomainError> {
        self.sent.lock().unwrap().push(SentMail::PasswordReset {
            to: to.to_string(),
            token: token.to_string(),
        });
        Ok(())
    }
}

/// Mailer whose transport is always down
pub(crate) struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
    async fn send_verification(&self, _to: &str, _token: &str) -> Result<(), DomainError> {
        Err(DomainError::internal("smtp unavailable"))
    }

    async fn send_password_reset(&self, _to: &str, _token: &str) -> Result<(), DomainError> {
        Err(DomainError::internal("smtp unavailable"))
    }
}
