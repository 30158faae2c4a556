//! Cryptographic services
//!
//! - AES-256-GCM encryption for cookie values
//! - Named password hashing (sha1/sha256/sha512, argon2, bcrypt)
//! - Secure persistence token generation

mod encryption;
mod hashing;
mod token;
mod utils;

pub use encryption::CryptoService;
pub use hashing::HashService;
pub use token::TokenGenerator;
pub use utils::{bytes_to_hex, constant_time_eq, sha256_hex};
