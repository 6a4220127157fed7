//! Log-backed mailer
//!
//! Renders account e-mails and writes them to the log instead of handing
//! them to an SMTP relay. Sender credentials are carried so the log line
//! names the configured identity, but the password is never printed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use hc_core::errors::DomainError;
use hc_core::services::auth::Mailer;
use hc_shared::config::EmailSettings;
use tracing::{debug, info};

use super::{mask_email, MailMessage, PASSWORD_RESET_SUBJECT, VERIFICATION_SUBJECT};

/// Mailer that logs instead of sending
#[derive(Clone)]
pub struct LogMailer {
    settings: EmailSettings,
    frontend_url: String,
    /// Number of messages rendered since construction
    sent_count: Arc<AtomicU64>,
}

impl LogMailer {
    pub fn new(settings: EmailSettings, frontend_url: impl Into<String>) -> Self {
        Self {
            settings,
            frontend_url: frontend_url.into().trim_end_matches('/').to_string(),
            sent_count: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Get the total number of messages sent
    pub fn sent_count(&self) -> u64 {
        self.sent_count.load(Ordering::SeqCst)
    }

    pub fn verification_message(&self, to: &str, token: &str) -> MailMessage {
        MailMessage {
            to: to.to_string(),
            subject: VERIFICATION_SUBJECT,
            link: format!("{}/verify-email?token={}", self.frontend_url, token),
        }
    }

    pub fn password_reset_message(&self, to: &str, token: &str) -> MailMessage {
        MailMessage {
            to: to.to_string(),
            subject: PASSWORD_RESET_SUBJECT,
            link: format!("{}/reset-password?token={}", self.frontend_url, token),
        }
    }

    fn deliver(&self, message: MailMessage) -> Result<(), DomainError> {
        info!(
            from = %self.settings.identity,
            to = %mask_email(&message.to),
            subject = message.subject,
            "mail dispatched"
        );
        // Links carry bearer tokens; keep them out of the default log level
        debug!(link = %message.link, "mail body link");

        self.sent_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send_verification(&self, to: &str, token: &str) -> Result<(), DomainError> {
        self.deliver(self.verification_message(to, token))
    }

    async fn send_password_reset(&self, to: &str, token: &str) -> Result<(), DomainError> {
        self.deliver(self.password_reset_message(to, token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> EmailSettings {
        EmailSettings {
            identity: "Healthcare <no-reply@healthcare.test>".to_string(),
            username: "mailer".to_string(),
            password: "smtp-secret".to_string(),
            host: "smtp.healthcare.test".to_string(),
            port: "587".to_string(),
        }
    }

    #[test]
    fn test_links_point_at_frontend() {
        let mailer = LogMailer::new(settings(), "http://localhost:3000/");

        let verify = mailer.verification_message("jane@example.com", "abc");
        assert_eq!(verify.link, "http://localhost:3000/verify-email?token=abc");
        assert_eq!(verify.subject, VERIFICATION_SUBJECT);

        let reset = mailer.password_reset_message("jane@example.com", "xyz");
        assert_eq!(reset.link, "http://localhost:3000/reset-password?token=xyz");
        assert_eq!(reset.subject, PASSWORD_RESET_SUBJECT);
    }

    #[tokio::test]
    async fn test_counts_sent_messages() {
        let mailer = LogMailer::new(settings(), "http://localhost:3000");
        mailer.send_verification("jane@example.com", "t1").await.unwrap();
        mailer.send_password_reset("jane@example.com", "t2").await.unwrap();

        let clone = mailer.clone();
        assert_eq!(clone.sent_count(), 2);
    }
}
