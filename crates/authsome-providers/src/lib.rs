//! # Authsome - Reference Adapters
//!
//! Implementations of the ports defined in `authsome-domain`, good enough for
//! single-process deployments and tests. Web integrations usually replace the
//! session and cookie stores with framework-backed ones and keep the rest.
//!
//! ## Adapters
//!
//! | Port | Implementation |
//! |------|----------------|
//! | `SessionStore` | `MemorySessionStore` (+ `SessionRegistry` for many clients) |
//! | `TokenCookieStore` | `MemoryCookieJar` |
//! | `CredentialBackend` + `TokenIssuer` | `MemoryCredentialBackend` |
//! | `PasswordHasher` | `HashService` |
//! | `CryptoProvider` | `CryptoService` (AES-256-GCM) |
//!
//! ## Feature Flags
//!
//! ```toml
//! [dependencies]
//! authsome-providers = { version = "0.1", default-features = false, features = ["hash-argon2"] }
//! ```
//!
//! Without `hash-argon2` / `hash-bcrypt` the corresponding methods are
//! reported as unknown by `HashService`.

pub use authsome_domain::error::{Error, Result};
pub use authsome_domain::ports::{
    CredentialBackend, CryptoProvider, EncryptedData, PasswordHasher, SessionStore,
    TokenCookieStore, TokenIssuer,
};

/// Provider-specific constants
pub mod constants;

/// Human-readable duration parsing
pub mod duration;

/// Encryption, hashing and token generation
pub mod crypto;

/// Session store implementations
pub mod session;

/// Cookie store implementations
pub mod cookie;

/// Credential backend implementations
pub mod backend;

pub use backend::{MemoryCredentialBackend, UserRecord};
pub use cookie::MemoryCookieJar;
pub use crypto::{CryptoService, HashService, TokenGenerator};
pub use session::{MemorySessionStore, SessionRegistry};
