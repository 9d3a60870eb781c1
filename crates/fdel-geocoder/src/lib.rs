pub mod cache;
pub mod client;
pub mod error;
pub mod geocoder;
pub mod types;

pub use cache::{CacheEntry, GeocodeCache};
pub use client::{AddressLookup, NominatimClient};
pub use error::GeocodeError;
pub use geocoder::Geocoder;
pub use types::{Candidate, Coordinate, GeocodeOutcome};
