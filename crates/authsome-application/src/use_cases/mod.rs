//! Use case implementations

pub mod identity_resolver;
pub mod persistence_manager;
pub mod session_manager;

pub use identity_resolver::IdentityResolver;
pub use persistence_manager::PersistenceManager;
pub use session_manager::SessionManager;
