//! Server configuration module

use std::time::Duration;

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    /// Service port (opaque; an invalid value fails at bind time)
    pub port: String,

    /// Front-end port used when building links sent by e-mail
    pub fe_port: String,

    /// Seconds in-flight requests get to finish after a shutdown signal
    pub graceful_period: u64,
}

impl ServerSettings {
    /// Get the bind address
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    /// Base URL of the front-end application
    pub fn frontend_url(&self) -> String {
        format!("http://localhost:{}", self.fe_port)
    }

    pub fn grace_period(&self) -> Duration {
        Duration::from_secs(self.graceful_period)
    }
}
