//! Application Layer - Authsome
//!
//! Use cases for working out who the current actor is, logging actors in
//! and out, and keeping persistent logins alive.
//!
//! ## Architecture
//!
//! The application layer:
//! - Runs the identity fallback chain (cache, session, cookie token, guest)
//! - Orchestrates collaborators only through `authsome_domain::ports`
//! - Has no dependencies on infrastructure or web frameworks
//!
//! ## Request scope
//!
//! Nothing here is global. Every request owns a [`RequestContext`] holding
//! its identity cache and the client's session and cookie stores; the
//! shared [`Authsome`] value is cheap to clone across workers.
//!
//! ```ignore
//! let mut ctx = RequestContext::new(session_store, cookie_store);
//! let user_id = authsome.get(&mut ctx, Some("id")).await?;
//! ```

pub mod accessor;
pub mod authsome;
pub mod context;
pub mod use_cases;

pub use authsome::{Authsome, AuthsomeBuilder};
pub use context::{RequestContext, RequestIdentityCache};
pub use use_cases::*;
