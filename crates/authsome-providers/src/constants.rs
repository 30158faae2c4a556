//! Provider constants

// ============================================================================
// ENCRYPTION
// ============================================================================

/// AES-256-GCM key size in bytes
pub const AES_GCM_KEY_SIZE: usize = 32;

/// AES-GCM nonce size in bytes
pub const AES_GCM_NONCE_SIZE: usize = 12;

/// Provider name reported by `CryptoService`
pub const CRYPTO_PROVIDER_NAME: &str = "aes-256-gcm";

// ============================================================================
// PASSWORD HASHING
// ============================================================================

/// bcrypt work factor
pub const BCRYPT_DEFAULT_COST: u32 = 12;

/// Hash method names understood by `HashService`
pub const HASH_METHOD_SHA1: &str = "sha1";
pub const HASH_METHOD_SHA256: &str = "sha256";
pub const HASH_METHOD_SHA512: &str = "sha512";
pub const HASH_METHOD_ARGON2: &str = "argon2";
pub const HASH_METHOD_BCRYPT: &str = "bcrypt";

// ============================================================================
// TOKENS
// ============================================================================

/// Random bytes per persistence token (hex-encoded to twice the length)
pub const PERSISTENCE_TOKEN_BYTES: usize = 32;

// ============================================================================
// COOKIE JAR
// ============================================================================

/// Prefix marking an encrypted cookie value in its exported form
pub const ENCRYPTED_COOKIE_PREFIX: &str = "enc:";
