//! Credential protector port.

use crate::connector::domain::SealedCredentials;
use serde_json::Value;
use thiserror::Error;

/// Single seam through which credential payloads are sealed and revealed.
///
/// Implementations must guarantee that `reveal(seal(x)) == x` and that the
/// sealed form is not human-readable. They must fail rather than pass
/// plaintext through.
pub trait CredentialProtector: Send + Sync {
    /// Seals a plaintext credential payload.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialProtectionError`] when sealing is not possible.
    fn seal(&self, plain: &Value) -> Result<SealedCredentials, CredentialProtectionError>;

    /// Reveals a sealed credential payload.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialProtectionError`] when the payload cannot be
    /// opened with the available key material.
    fn reveal(&self, sealed: &SealedCredentials) -> Result<Value, CredentialProtectionError>;
}

/// Errors returned by credential protectors.
///
/// Messages never include plaintext or sealed material.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialProtectionError {
    /// No key material is configured.
    #[error("credential key material is not configured")]
    KeyUnavailable,

    /// Configured key material is malformed.
    #[error("credential key material is invalid: {0}")]
    InvalidKeyMaterial(String),

    /// The payload was sealed with a different key.
    #[error("credentials were sealed with key {found}, active key is {expected}")]
    KeyMismatch {
        /// Fingerprint of the active key.
        expected: String,
        /// Fingerprint recorded in the payload.
        found: String,
    },

    /// Encryption failed.
    #[error("credential sealing failed")]
    SealFailed,

    /// Decryption or decoding failed, including tampered payloads.
    #[error("credential reveal failed")]
    RevealFailed,
}
