pub mod client;
pub mod error;
pub mod fetch;
pub mod types;

pub use client::PlacesClient;
pub use error::PlacesError;
pub use fetch::SearchSpec;
pub use types::{PlaceDetails, PlaceSummary};
