//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns that wire Authsome into a running
//! process.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | TOML + environment configuration via figment |
//! | [`constants`] | Configuration file names, env prefix, log defaults |
//! | [`di`] | Composition root building `Authsome` from `AppConfig` |
//! | [`error_ext`] | Context helpers mapping foreign errors to domain errors |
//! | [`logging`] | Structured logging with tracing |

pub mod config;
pub mod constants;
pub mod di;
pub mod error_ext;
pub mod logging;

pub use config::{AppConfig, ConfigLoader};
pub use di::{AppContext, init_app};
pub use error_ext::ErrorContext;
