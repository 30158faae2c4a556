//! Value objects shared by every layer

mod credentials;
mod identity;
mod settings;
mod token;

pub use credentials::Credentials;
pub use identity::Identity;
pub use settings::Settings;
pub use token::PersistenceToken;
