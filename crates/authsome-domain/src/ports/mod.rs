//! Ports (interfaces) for Authsome collaborators
//!
//! The application layer depends only on these traits. Implementations
//! live in `authsome-providers` or in the embedding web application.
//!
//! | Port | Role |
//! |------|------|
//! | [`CredentialBackend`] | Turns credentials into an identity |
//! | [`TokenIssuer`] | Mints persistence tokens |
//! | [`SessionStore`] | Client-scoped, server-side key-value store |
//! | [`TokenCookieStore`] | Client-held encrypted value with expiry |
//! | [`PasswordHasher`] | Named password hashing primitives |
//! | [`CryptoProvider`] | Symmetric encryption for cookie values |

pub mod backend;
pub mod cookie;
pub mod crypto;
pub mod hashing;
pub mod session;

pub use backend::{CredentialBackend, TokenIssuer};
pub use cookie::TokenCookieStore;
pub use crypto::{CryptoProvider, EncryptedData};
pub use hashing::PasswordHasher;
pub use session::SessionStore;
