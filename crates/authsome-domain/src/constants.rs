//! Domain constants
//!
//! Credential type tags, wire-format delimiters and the defaults a
//! deployment gets when it configures nothing.

// ============================================================================
// CREDENTIAL TYPES
// ============================================================================

/// Credential type used when a login call names no type
pub const CREDENTIALS_TYPE: &str = "credentials";

/// Credential type for persistent-login cookie tokens
pub const COOKIE_TYPE: &str = "cookie";

/// Credential type for the anonymous fallback account
pub const GUEST_TYPE: &str = "guest";

// ============================================================================
// WIRE FORMAT
// ============================================================================

/// Separator between the opaque token and its duration in a cookie value
pub const TOKEN_DELIMITER: char = ':';

/// Separator for dotted-path field extraction (`"User.id"`)
pub const PATH_SEPARATOR: char = '.';

// ============================================================================
// DEFAULTS
// ============================================================================

/// Default identity model name, also the default for every storage key
pub const DEFAULT_MODEL: &str = "User";

/// Default lifetime of a persistent login
pub const DEFAULT_PERSIST_DURATION: &str = "2 weeks";

/// Default password hashing method
pub const DEFAULT_HASH_METHOD: &str = "sha1";
