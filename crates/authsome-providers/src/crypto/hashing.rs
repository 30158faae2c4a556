//! Named password hashing
//!
//! Digest methods (`sha1`, `sha256`, `sha512`) produce lowercase hex and,
//! when salting is requested, hash `salt + password`. `argon2` and `bcrypt`
//! produce self-describing strings with their own random salt; the
//! deployment salt is still prepended as a pepper when requested.

use crate::constants::{
    BCRYPT_DEFAULT_COST, HASH_METHOD_ARGON2, HASH_METHOD_BCRYPT, HASH_METHOD_SHA1,
    HASH_METHOD_SHA256, HASH_METHOD_SHA512,
};
use crate::crypto::utils::{bytes_to_hex, constant_time_eq};
use authsome_domain::error::{Error, Result};
use authsome_domain::ports::PasswordHasher;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};

/// `PasswordHasher` over digest and password-hashing algorithms
#[derive(Clone)]
pub struct HashService {
    salt: String,
    bcrypt_cost: u32,
}

impl HashService {
    /// Create a hash service with the deployment-wide salt
    pub fn new<S: Into<String>>(salt: S) -> Self {
        Self {
            salt: salt.into(),
            bcrypt_cost: BCRYPT_DEFAULT_COST,
        }
    }

    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    /// Method names this build can hash with
    pub fn supported_methods() -> Vec<&'static str> {
        let mut methods = vec![HASH_METHOD_SHA1, HASH_METHOD_SHA256, HASH_METHOD_SHA512];
        if cfg!(feature = "hash-argon2") {
            methods.push(HASH_METHOD_ARGON2);
        }
        if cfg!(feature = "hash-bcrypt") {
            methods.push(HASH_METHOD_BCRYPT);
        }
        methods
    }

    /// Whether `method` is one of [`HashService::supported_methods`]
    pub fn is_supported(method: &str) -> bool {
        Self::supported_methods().contains(&method.to_ascii_lowercase().as_str())
    }

    fn salted(&self, password: &str, salt: bool) -> String {
        if salt {
            format!("{}{}", self.salt, password)
        } else {
            password.to_string()
        }
    }

    fn digest(method: &str, input: &[u8]) -> Option<String> {
        let hex = match method {
            HASH_METHOD_SHA1 => bytes_to_hex(&Sha1::digest(input)),
            HASH_METHOD_SHA256 => bytes_to_hex(&Sha256::digest(input)),
            HASH_METHOD_SHA512 => bytes_to_hex(&Sha512::digest(input)),
            _ => return None,
        };
        Some(hex)
    }

    #[cfg(feature = "hash-argon2")]
    fn argon2_hash(input: &str) -> Result<String> {
        use argon2::password_hash::{SaltString, rand_core::OsRng as ArgonOsRng};
        use argon2::{Argon2, PasswordHasher as _};

        let salt = SaltString::generate(&mut ArgonOsRng);
        Argon2::default()
            .hash_password(input.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| Error::crypto(format!("Password hashing failed: {e}")))
    }

    #[cfg(feature = "hash-argon2")]
    fn argon2_verify(input: &str, hash: &str) -> Result<bool> {
        use argon2::password_hash::PasswordHash;
        use argon2::{Argon2, PasswordVerifier};

        let parsed = PasswordHash::new(hash)
            .map_err(|e| Error::invalid_argument(format!("Invalid argon2 hash format: {e}")))?;
        Ok(Argon2::default()
            .verify_password(input.as_bytes(), &parsed)
            .is_ok())
    }

    #[cfg(feature = "hash-bcrypt")]
    fn bcrypt_hash(&self, input: &str) -> Result<String> {
        bcrypt::hash(input, self.bcrypt_cost)
            .map_err(|e| Error::crypto(format!("Password hashing failed: {e}")))
    }

    #[cfg(feature = "hash-bcrypt")]
    fn bcrypt_verify(input: &str, hash: &str) -> Result<bool> {
        bcrypt::verify(input, hash)
            .map_err(|e| Error::invalid_argument(format!("Invalid bcrypt hash: {e}")))
    }

    fn unknown(method: &str) -> Error {
        Error::invalid_argument(format!("Unknown hash method '{method}'"))
    }
}

impl Default for HashService {
    fn default() -> Self {
        Self::new("")
    }
}

impl PasswordHasher for HashService {
    fn hash(&self, password: &str, method: &str, salt: bool) -> Result<String> {
        let method = method.to_ascii_lowercase();
        let input = self.salted(password, salt);

        if let Some(hex) = Self::digest(&method, input.as_bytes()) {
            return Ok(hex);
        }

        match method.as_str() {
            #[cfg(feature = "hash-argon2")]
            HASH_METHOD_ARGON2 => Self::argon2_hash(&input),
            #[cfg(feature = "hash-bcrypt")]
            HASH_METHOD_BCRYPT => self.bcrypt_hash(&input),
            _ => Err(Self::unknown(&method)),
        }
    }

    fn verify(&self, password: &str, hash: &str, method: &str, salt: bool) -> Result<bool> {
        let method = method.to_ascii_lowercase();
        let input = self.salted(password, salt);

        if let Some(hex) = Self::digest(&method, input.as_bytes()) {
            return Ok(constant_time_eq(
                hex.as_bytes(),
                hash.trim().to_ascii_lowercase().as_bytes(),
            ));
        }

        match method.as_str() {
            #[cfg(feature = "hash-argon2")]
            HASH_METHOD_ARGON2 => Self::argon2_verify(&input, hash),
            #[cfg(feature = "hash-bcrypt")]
            HASH_METHOD_BCRYPT => Self::bcrypt_verify(&input, hash),
            _ => Err(Self::unknown(&method)),
        }
    }
}

impl std::fmt::Debug for HashService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HashService")
            .field("salt", &"<redacted>")
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}
