//! Token signing configuration

use std::fmt;

/// One signing secret per token purpose.
///
/// A token signed with one secret never verifies under another, so a
/// refresh or reset token cannot be replayed as an access token.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningSecrets {
    pub verification: String,
    pub access: String,
    pub refresh: String,
    pub reset_password: String,
}

impl fmt::Debug for SigningSecrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningSecrets")
            .field("verification", &"<redacted>")
            .field("access", &"<redacted>")
            .field("refresh", &"<redacted>")
            .field("reset_password", &"<redacted>")
            .finish()
    }
}

impl SigningSecrets {
    /// Returns true if any secret is empty (probably misconfigured)
    pub fn has_empty(&self) -> bool {
        [&self.verification, &self.access, &self.refresh, &self.reset_password]
            .iter()
            .any(|s| s.is_empty())
    }
}
