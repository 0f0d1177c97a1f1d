//! Sealed credential payloads.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Credential payload after it has passed through a credential protector.
///
/// The sealed form is safe to persist but is still never logged or emitted:
/// the `Debug` output only names the key fingerprint.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealedCredentials {
    key_id: String,
    nonce: String,
    ciphertext: String,
}

impl SealedCredentials {
    /// Assembles a sealed payload from its encoded parts.
    #[must_use]
    pub fn new(
        key_id: impl Into<String>,
        nonce: impl Into<String>,
        ciphertext: impl Into<String>,
    ) -> Self {
        Self {
            key_id: key_id.into(),
            nonce: nonce.into(),
            ciphertext: ciphertext.into(),
        }
    }

    /// Returns the fingerprint of the key that sealed this payload.
    #[must_use]
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Returns the encoded nonce.
    #[must_use]
    pub fn nonce(&self) -> &str {
        &self.nonce
    }

    /// Returns the encoded ciphertext.
    #[must_use]
    pub fn ciphertext(&self) -> &str {
        &self.ciphertext
    }
}

impl fmt::Debug for SealedCredentials {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SealedCredentials")
            .field("key_id", &self.key_id)
            .finish_non_exhaustive()
    }
}
