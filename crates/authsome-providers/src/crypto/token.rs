//! Random material for persistence tokens and cookie keys

use aes_gcm::aead::{OsRng, rand_core::RngCore};

use super::utils::bytes_to_hex;
use crate::constants::{AES_GCM_KEY_SIZE, PERSISTENCE_TOKEN_BYTES};

/// Generates the opaque strings handed out to clients and operators
pub struct TokenGenerator;

impl TokenGenerator {
    /// A fresh persistence token
    ///
    /// Hex encoded, so it never contains the `:` that separates token and
    /// duration in the cookie value.
    pub fn persistence_token() -> String {
        random_hex(PERSISTENCE_TOKEN_BYTES)
    }

    /// A hex AES-256 key accepted as `security.cookie_secret`
    pub fn cookie_secret() -> String {
        random_hex(AES_GCM_KEY_SIZE)
    }
}

fn random_hex(length: usize) -> String {
    let mut bytes = vec![0u8; length];
    OsRng.fill_bytes(&mut bytes);
    bytes_to_hex(&bytes)
}
