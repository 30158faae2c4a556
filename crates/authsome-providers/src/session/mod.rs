//! Session store implementations
//!
//! | Type | Role |
//! |------|------|
//! | `MemorySessionStore` | One client's session entries |
//! | `SessionRegistry` | Session id → `MemorySessionStore`, with idle cleanup |

mod memory;

pub use memory::{MemorySessionStore, SessionRegistry};
