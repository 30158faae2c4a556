//! # Domain Layer
//!
//! Core types and contracts for active-identity resolution.
//!
//! This crate knows nothing about how sessions are stored, how cookies are
//! transported or how passwords are hashed. It defines:
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`value_objects`] | `Identity`, `Credentials`, `PersistenceToken`, `Settings` |
//! | [`ports`] | Traits every collaborator must implement |
//! | [`error`] | The shared error type |
//! | [`constants`] | Credential type names and defaults |

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use value_objects::*;
