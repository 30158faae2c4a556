//! Configuration
//!
//! Sources are merged in order, later ones winning:
//!
//! 1. `AppConfig::default()`
//! 2. `authsome.toml` (explicit path, or the first one found in the working
//!    directory, `./authsome/`, the user config dir or `~/.authsome/`)
//! 3. `AUTHSOME__SECTION__KEY` environment variables

pub mod loader;
pub mod types;

pub use loader::{ConfigLoader, validate_app_config};
pub use types::*;
