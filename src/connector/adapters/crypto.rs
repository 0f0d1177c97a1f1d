//! AES-256-GCM credential protector.
//!
//! Credential payloads are serialised to JSON, encrypted with a random 96-bit
//! nonce, and stored as base64 alongside a fingerprint of the sealing key.

use crate::config::SwitchyardConfig;
use crate::connector::{
    domain::SealedCredentials,
    ports::{CredentialProtectionError, CredentialProtector},
};
use aes_gcm::{
    Aes256Gcm, Nonce,
    aead::{Aead, AeadCore, KeyInit, OsRng},
};
use base64::{Engine, engine::general_purpose::STANDARD};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::{
    env::{self, VarError},
    fmt,
};

/// AES-256 key length in bytes.
const KEY_SIZE: usize = 32;

/// AES-GCM nonce length in bytes.
const NONCE_SIZE: usize = 12;

/// Number of digest bytes kept in a key fingerprint.
const FINGERPRINT_BYTES: usize = 8;

/// AES-256 key used to seal credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialKey {
    bytes: [u8; KEY_SIZE],
}

impl CredentialKey {
    /// Wraps raw key bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    /// Decodes a base64-encoded 32-byte key.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialProtectionError::InvalidKeyMaterial`] when the
    /// input is not valid base64 or does not decode to 32 bytes.
    pub fn from_base64(encoded: &str) -> Result<Self, CredentialProtectionError> {
        let decoded = STANDARD.decode(encoded.trim()).map_err(|err| {
            CredentialProtectionError::InvalidKeyMaterial(format!("not valid base64: {err}"))
        })?;
        let bytes: [u8; KEY_SIZE] = decoded.try_into().map_err(|raw: Vec<u8>| {
            CredentialProtectionError::InvalidKeyMaterial(format!(
                "expected {KEY_SIZE} bytes, got {}",
                raw.len()
            ))
        })?;
        Ok(Self::from_bytes(bytes))
    }

    /// Generates a random key from the operating system RNG.
    #[must_use]
    pub fn generate() -> Self {
        let generated = Aes256Gcm::generate_key(OsRng);
        let mut bytes = [0_u8; KEY_SIZE];
        bytes.copy_from_slice(generated.as_slice());
        Self::from_bytes(bytes)
    }

    /// Returns the key as base64, for provisioning.
    #[must_use]
    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.bytes)
    }

    /// Returns a short hex fingerprint identifying this key.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.bytes);
        hex::encode(digest.iter().take(FINGERPRINT_BYTES).copied().collect::<Vec<_>>())
    }

    fn cipher(&self) -> Result<Aes256Gcm, CredentialProtectionError> {
        Aes256Gcm::new_from_slice(&self.bytes)
            .map_err(|err| CredentialProtectionError::InvalidKeyMaterial(err.to_string()))
    }
}

impl fmt::Debug for CredentialKey {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("CredentialKey")
            .field("fingerprint", &self.fingerprint())
            .finish_non_exhaustive()
    }
}

/// Credential protector backed by AES-256-GCM.
///
/// A protector built without key material refuses every operation with
/// [`CredentialProtectionError::KeyUnavailable`]; it never falls back to
/// storing plaintext.
#[derive(Debug, Clone)]
pub struct AesGcmCredentialProtector {
    key: Option<CredentialKey>,
}

impl AesGcmCredentialProtector {
    /// Creates a protector using `key`.
    #[must_use]
    pub const fn new(key: CredentialKey) -> Self {
        Self { key: Some(key) }
    }

    /// Creates a protector with no key material.
    #[must_use]
    pub const fn without_key() -> Self {
        Self { key: None }
    }

    /// Creates a protector from the environment variable named in `config`.
    ///
    /// A missing variable yields a protector without key material so the
    /// process can start and report `CredentialProtectionUnavailable` per
    /// operation.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialProtectionError::InvalidKeyMaterial`] when the
    /// variable is set but malformed, including values that are not UTF-8.
    pub fn from_config(config: &SwitchyardConfig) -> Result<Self, CredentialProtectionError> {
        Self::from_variable(
            &config.credential_key_env,
            env::var(&config.credential_key_env),
        )
    }

    fn from_variable(
        name: &str,
        value: Result<String, VarError>,
    ) -> Result<Self, CredentialProtectionError> {
        match value {
            Ok(encoded) => Ok(Self::new(CredentialKey::from_base64(&encoded)?)),
            Err(VarError::NotPresent) => {
                tracing::warn!(
                    variable = %name,
                    "credential key is not configured; credential operations will be refused"
                );
                Ok(Self::without_key())
            }
            Err(VarError::NotUnicode(_)) => Err(CredentialProtectionError::InvalidKeyMaterial(
                format!("{name} is not valid UTF-8"),
            )),
        }
    }

    /// Returns whether key material is configured.
    #[must_use]
    pub const fn has_key(&self) -> bool {
        self.key.is_some()
    }

    fn active_key(&self) -> Result<&CredentialKey, CredentialProtectionError> {
        self.key
            .as_ref()
            .ok_or(CredentialProtectionError::KeyUnavailable)
    }
}

impl CredentialProtector for AesGcmCredentialProtector {
    fn seal(&self, plain: &Value) -> Result<SealedCredentials, CredentialProtectionError> {
        let key = self.active_key()?;
        let plaintext =
            serde_json::to_vec(plain).map_err(|_| CredentialProtectionError::SealFailed)?;
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = key
            .cipher()?
            .encrypt(&nonce, plaintext.as_slice())
            .map_err(|_| CredentialProtectionError::SealFailed)?;

        Ok(SealedCredentials::new(
            key.fingerprint(),
            STANDARD.encode(nonce.as_slice()),
            STANDARD.encode(ciphertext),
        ))
    }

    fn reveal(&self, sealed: &SealedCredentials) -> Result<Value, CredentialProtectionError> {
        let key = self.active_key()?;
        let expected = key.fingerprint();
        if sealed.key_id() != expected {
            return Err(CredentialProtectionError::KeyMismatch {
                expected,
                found: sealed.key_id().to_owned(),
            });
        }

        let nonce_bytes = STANDARD
            .decode(sealed.nonce())
            .map_err(|_| CredentialProtectionError::RevealFailed)?;
        if nonce_bytes.len() != NONCE_SIZE {
            return Err(CredentialProtectionError::RevealFailed);
        }
        let ciphertext = STANDARD
            .decode(sealed.ciphertext())
            .map_err(|_| CredentialProtectionError::RevealFailed)?;

        let plaintext = key
            .cipher()?
            .decrypt(Nonce::from_slice(&nonce_bytes), ciphertext.as_slice())
            .map_err(|_| CredentialProtectionError::RevealFailed)?;
        serde_json::from_slice(&plaintext).map_err(|_| CredentialProtectionError::RevealFailed)
    }
}
