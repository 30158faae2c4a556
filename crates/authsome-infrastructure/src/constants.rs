//! Infrastructure layer constants
//!
//! Domain-specific constants are defined in `authsome_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "authsome.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "authsome";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "AUTHSOME";

/// Separator between nested keys in environment variables
/// (`AUTHSOME__AUTH__MODEL` → `auth.model`)
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "AUTHSOME_LOG";

/// File stem used when a log file path has none
pub const DEFAULT_LOG_FILE_STEM: &str = "authsome";
