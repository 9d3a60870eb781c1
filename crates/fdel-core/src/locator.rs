//! Shareable locator codec.
//!
//! A locator is the route serialized as JSON and percent-encoded so it can
//! ride in a URL fragment. Decoding merges whatever the locator carries over
//! the default route: any field that is absent, `null`, or empty falls back
//! to its default, so locators written by older pages still load.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Deserialize;
use thiserror::Error;

use crate::route::{Route, Stop, DEFAULT_QUANTITY};

/// Characters left unescaped, matching what browsers leave alone in
/// `encodeURIComponent`.
const LOCATOR_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Error)]
pub enum LocatorError {
    #[error("refusing to encode a route with no stops")]
    EmptyRoute,

    #[error("failed to serialize route: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("locator is not valid UTF-8 after percent-decoding: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("locator is not a valid route document: {0}")]
    Malformed(#[source] serde_json::Error),
}

/// Serialized shape tolerant of older and shorter locators.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRoute {
    route_name: Option<String>,
    pickup_location_key: Option<String>,
    date: Option<String>,
    time: Option<String>,
    #[serde(alias = "entries")]
    stops: Option<Vec<RawStop>>,
}

#[derive(Debug, Deserialize)]
struct RawStop {
    address: Option<String>,
    quantity: Option<RawQuantity>,
    notes: Option<String>,
}

/// Early editors stored quantities as the raw form text.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawQuantity {
    Number(u32),
    Text(String),
}

impl RawQuantity {
    fn resolve(self) -> u32 {
        match self {
            RawQuantity::Number(n) => n,
            RawQuantity::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return DEFAULT_QUANTITY;
                }
                trimmed.parse().unwrap_or_else(|_| {
                    tracing::warn!(value = %text, "unparseable quantity in locator, using default");
                    DEFAULT_QUANTITY
                })
            }
        }
    }
}

impl From<RawStop> for Stop {
    fn from(raw: RawStop) -> Self {
        Stop {
            address: raw.address.unwrap_or_default(),
            quantity: raw.quantity.map_or(DEFAULT_QUANTITY, RawQuantity::resolve),
            notes: raw.notes.unwrap_or_default(),
        }
    }
}

/// Encodes `route` into a fragment-safe locator string.
///
/// # Errors
///
/// Returns [`LocatorError::EmptyRoute`] if the route has no stops; callers
/// must repair the route before publishing it.
pub fn encode(route: &Route) -> Result<String, LocatorError> {
    if route.stops.is_empty() {
        return Err(LocatorError::EmptyRoute);
    }
    let json = serde_json::to_string(route).map_err(LocatorError::Serialize)?;
    Ok(utf8_percent_encode(&json, LOCATOR_ENCODE_SET).to_string())
}

/// Decodes a locator, merging it over [`Route::default`].
///
/// A leading `#` is ignored so a raw URL fragment can be passed in directly.
///
/// # Errors
///
/// - [`LocatorError::Encoding`] if the percent-decoded bytes are not UTF-8.
/// - [`LocatorError::Malformed`] if the payload is not a JSON route object.
pub fn decode(locator: &str) -> Result<Route, LocatorError> {
    let payload = locator.strip_prefix('#').unwrap_or(locator);
    let json = percent_decode_str(payload).decode_utf8()?;
    let raw: RawRoute = serde_json::from_str(&json).map_err(LocatorError::Malformed)?;
    Ok(merge_with_defaults(raw))
}

/// Decodes a locator, starting from the default route when it is empty or
/// cannot be parsed. Never merges a partially parsed payload.
#[must_use]
pub fn decode_or_default(locator: &str) -> Route {
    let payload = locator.strip_prefix('#').unwrap_or(locator);
    if payload.trim().is_empty() {
        return Route::default();
    }
    match decode(payload) {
        Ok(route) => route,
        Err(e) => {
            tracing::warn!(error = %e, "unreadable locator, starting from the default route");
            Route::default()
        }
    }
}

/// Builds the link to the read-only view carrying `locator` as its fragment.
#[must_use]
pub fn share_link(view_page: &str, locator: &str) -> String {
    format!("{view_page}#{locator}")
}

fn merge_with_defaults(raw: RawRoute) -> Route {
    let defaults = Route::default();
    let text = |value: Option<String>, fallback: String| -> String {
        value.filter(|s| !s.is_empty()).unwrap_or(fallback)
    };

    let stops = raw
        .stops
        .filter(|stops| !stops.is_empty())
        .map_or(defaults.stops, |stops| {
            stops.into_iter().map(Stop::from).collect()
        });

    Route {
        route_name: text(raw.route_name, defaults.route_name),
        pickup_location_key: text(raw.pickup_location_key, defaults.pickup_location_key),
        date: text(raw.date, defaults.date),
        time: text(raw.time, defaults.time),
        stops,
    }
}

#[cfg(test)]
#[path = "locator_test.rs"]
mod tests;
