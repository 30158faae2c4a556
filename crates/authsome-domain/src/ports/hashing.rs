//! Password Hashing Port

use crate::error::Result;

/// Named password hashing primitives
///
/// `method` selects the algorithm (`"sha1"`, `"sha256"`, `"argon2"`, ...).
/// `salt` asks the implementation to mix in its deployment-wide salt.
pub trait PasswordHasher: Send + Sync {
    /// Hash `password` with the named method
    fn hash(&self, password: &str, method: &str, salt: bool) -> Result<String>;

    /// Check `password` against a hash produced by [`PasswordHasher::hash`]
    /// with the same `method` and `salt`
    fn verify(&self, password: &str, hash: &str, method: &str, salt: bool) -> Result<bool>;
}
