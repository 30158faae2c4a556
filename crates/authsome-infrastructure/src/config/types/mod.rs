//! Configuration types module

pub mod app;
pub mod logging;
pub mod security;

pub use app::{AppConfig, GuestConfig};
pub use logging::LoggingConfig;
pub use security::SecurityConfig;
