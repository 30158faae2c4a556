//! Cookie store implementations

mod memory;

pub use memory::MemoryCookieJar;
