//! Outbound e-mail configuration

use std::fmt;

/// Sender credentials for outbound e-mail
#[derive(Clone, PartialEq, Eq)]
pub struct EmailSettings {
    /// Sender identity used in the From header
    pub identity: String,
    pub username: String,
    pub password: String,
    pub host: String,
    pub port: String,
}

impl fmt::Debug for EmailSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailSettings")
            .field("identity", &self.identity)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}
