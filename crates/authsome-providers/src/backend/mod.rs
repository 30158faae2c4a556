//! Credential backend implementations

mod memory;

pub use memory::{MemoryCredentialBackend, UserRecord};
