pub mod discover;
pub mod error;
pub mod extract;
pub mod guess;
pub mod validate;

pub use discover::EmailScout;
pub use error::DiscoveryError;
pub use guess::guess_fallback_email;
pub use validate::is_valid_email;
