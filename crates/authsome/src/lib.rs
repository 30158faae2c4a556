//! # Authsome
//!
//! Works out who the current actor is on every request, in order:
//!
//! 1. the identity already resolved earlier in the request,
//! 2. the identity stored in the client's session,
//! 3. a single-use persistence ("remember me") token from an encrypted
//!    cookie, rotated on every successful use,
//! 4. a guest account.
//!
//! ## Example
//!
//! ```ignore
//! use authsome::infrastructure::{ConfigLoader, init_app};
//! use authsome::Credentials;
//!
//! let app = init_app(ConfigLoader::new().load()?)?;
//! let jar = app.new_cookie_jar();
//! let mut ctx = app.request_context("session-id", jar);
//!
//! app.authsome().login(&mut ctx, Credentials::password("alice", "secret")).await?;
//! app.authsome().persist(&mut ctx, Some("2 weeks")).await?;
//! let id = app.authsome().get(&mut ctx, Some("id")).await?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - identity, credentials, tokens, settings, ports and errors
//! - `application` - `Authsome` facade, request context and use cases
//! - `providers` - in-memory stores, AES-GCM, password hashing
//! - `infrastructure` - configuration, logging and bootstrap

/// Domain layer - core types and port traits
pub mod domain {
    pub use authsome_domain::*;
}

/// Application layer - facade, request context and use cases
pub mod application {
    pub use authsome_application::*;
}

/// Reference adapters
pub mod providers {
    pub use authsome_providers::*;
}

/// Infrastructure layer - config, logging and bootstrap
pub mod infrastructure {
    pub use authsome_infrastructure::*;
}

/// Command line interface
pub mod cli;

pub use application::{Authsome, AuthsomeBuilder, RequestContext};
pub use domain::*;
