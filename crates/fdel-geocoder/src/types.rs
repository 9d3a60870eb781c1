//! Coordinates, raw service candidates, and the tagged lookup outcome.

use serde::Deserialize;

use crate::error::GeocodeError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// One search result as Nominatim returns it. Coordinates arrive as strings.
#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    pub lat: String,
    pub lon: String,
    pub display_name: String,
}

impl Candidate {
    /// # Errors
    ///
    /// Returns [`GeocodeError::InvalidCoordinate`] if either component does
    /// not parse as a finite number.
    pub fn coordinate(&self) -> Result<Coordinate, GeocodeError> {
        Ok(Coordinate::new(parse_degrees(&self.lat)?, parse_degrees(&self.lon)?))
    }
}

fn parse_degrees(raw: &str) -> Result<f64, GeocodeError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| GeocodeError::InvalidCoordinate {
            value: raw.to_string(),
        })
}

/// Result of resolving one address.
///
/// `NotFound` is a normal answer (the service had no candidates, or an
/// earlier attempt was memoized as unresolvable); `Failed` means the request
/// itself went wrong.
#[derive(Debug, Clone, PartialEq)]
pub enum GeocodeOutcome {
    Found {
        coordinate: Coordinate,
        display_address: String,
    },
    NotFound,
    Failed {
        message: String,
    },
}

impl GeocodeOutcome {
    /// Hands the outcome to success/failure callbacks.
    ///
    /// `on_success` receives `None` for "not found"; `on_failure` only fires
    /// when the request failed.
    pub fn dispatch<S, F>(self, on_success: S, on_failure: F)
    where
        S: FnOnce(Option<(Coordinate, String)>),
        F: FnOnce(String),
    {
        match self {
            GeocodeOutcome::Found {
                coordinate,
                display_address,
            } => on_success(Some((coordinate, display_address))),
            GeocodeOutcome::NotFound => on_success(None),
            GeocodeOutcome::Failed { message } => on_failure(message),
        }
    }
}
