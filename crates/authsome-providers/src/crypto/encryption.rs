//! Encryption/decryption service using AES-GCM

use crate::constants::{AES_GCM_KEY_SIZE, AES_GCM_NONCE_SIZE, CRYPTO_PROVIDER_NAME};
use aes_gcm::{
    Aes256Gcm, Key, Nonce,
    aead::{Aead, AeadCore, KeyInit, OsRng as AeadOsRng, rand_core::RngCore as AeadRngCore},
};
use authsome_domain::error::{Error, Result};
use authsome_domain::ports::{CryptoProvider, EncryptedData};

/// Encryption/decryption service
///
/// Implements the `CryptoProvider` port with a single 256-bit key.
#[derive(Clone)]
pub struct CryptoService {
    master_key: Vec<u8>,
}

impl CryptoService {
    /// Create a crypto service with the provided key
    pub fn new(master_key: Vec<u8>) -> Result<Self> {
        if master_key.len() != AES_GCM_KEY_SIZE {
            return Err(Error::configuration(format!(
                "Invalid master key size: expected {} bytes, got {}",
                AES_GCM_KEY_SIZE,
                master_key.len()
            )));
        }

        Ok(Self { master_key })
    }

    /// Create a crypto service from a hex-encoded key
    pub fn from_hex(key: &str) -> Result<Self> {
        let bytes = hex::decode(key.trim())
            .map_err(|e| Error::configuration_with_source("cookie secret is not valid hex", e))?;
        Self::new(bytes)
    }

    /// Generate a random key
    pub fn generate_master_key() -> Vec<u8> {
        let mut key = vec![0u8; AES_GCM_KEY_SIZE];
        AeadOsRng.fill_bytes(&mut key);
        key
    }

    fn cipher(&self) -> Aes256Gcm {
        Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&self.master_key))
    }

    /// Encrypt data using AES-GCM with a fresh random nonce
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<EncryptedData> {
        let nonce = Aes256Gcm::generate_nonce(&mut AeadOsRng);

        let ciphertext = self
            .cipher()
            .encrypt(&nonce, plaintext)
            .map_err(|e| Error::crypto(format!("Encryption failed: {e}")))?;

        Ok(EncryptedData::new(ciphertext, nonce.to_vec()))
    }

    /// Decrypt data using AES-GCM
    ///
    /// Fails on a wrong key, a tampered ciphertext or a malformed nonce.
    pub fn decrypt(&self, encrypted_data: &EncryptedData) -> Result<Vec<u8>> {
        if encrypted_data.nonce.len() != AES_GCM_NONCE_SIZE {
            return Err(Error::crypto(format!(
                "Invalid nonce size: expected {} bytes, got {}",
                AES_GCM_NONCE_SIZE,
                encrypted_data.nonce.len()
            )));
        }
        let nonce = Nonce::from_slice(&encrypted_data.nonce);

        self.cipher()
            .decrypt(nonce, encrypted_data.ciphertext.as_ref())
            .map_err(|e| Error::crypto(format!("Decryption failed: {e}")))
    }
}

impl CryptoProvider for CryptoService {
    fn encrypt(&self, plaintext: &[u8]) -> Result<EncryptedData> {
        CryptoService::encrypt(self, plaintext)
    }

    fn decrypt(&self, encrypted_data: &EncryptedData) -> Result<Vec<u8>> {
        CryptoService::decrypt(self, encrypted_data)
    }

    fn provider_name(&self) -> &str {
        CRYPTO_PROVIDER_NAME
    }
}

impl std::fmt::Debug for CryptoService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CryptoService")
            .field("master_key", &"<redacted>")
            .finish()
    }
}
