//! Outbound mail
//!
//! Only the log-backed mailer ships with this crate. It renders the same
//! subject and link a real transport would send, and writes them to the log.

mod log_mailer;

pub use log_mailer::LogMailer;

/// A rendered account e-mail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub to: String,
    pub subject: &'static str,
    pub link: String,
}

pub const VERIFICATION_SUBJECT: &str = "Verify your e-mail address";
pub const PASSWORD_RESET_SUBJECT: &str = "Reset your password";

/// Mask an e-mail address for logging (`jane.doe@example.com` -> `j*******@example.com`)
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let mut chars = local.chars();
            let first = chars.next().unwrap_or('*');
            format!("{}{}@{}", first, "*".repeat(chars.count()), domain)
        }
        _ => "***".to_string(),
    }
}
