//! Canonical route model: metadata plus the ordered stop list.

use serde::{Deserialize, Serialize};

pub const DEFAULT_ROUTE_NAME: &str = "";
pub const DEFAULT_PICKUP_LOCATION_KEY: &str = "ofb";
pub const DEFAULT_DATE: &str = "";
pub const DEFAULT_TIME: &str = "10:00";
pub const DEFAULT_QUANTITY: u32 = 1;

/// One delivery point.
///
/// A stop whose address is blank is an editable placeholder only: it is
/// never geocoded, never counted in totals, and never shown on a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stop {
    pub address: String,
    pub quantity: u32,
    pub notes: String,
}

impl Stop {
    #[must_use]
    pub fn new(address: impl Into<String>, quantity: u32, notes: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            quantity,
            notes: notes.into(),
        }
    }

    /// The placeholder row inserted whenever a route would otherwise be empty.
    #[must_use]
    pub fn blank() -> Self {
        Self::new("", DEFAULT_QUANTITY, "")
    }

    /// Only an empty address marks a placeholder; whitespace is still an address.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.address.is_empty()
    }
}

impl Default for Stop {
    fn default() -> Self {
        Self::blank()
    }
}

/// The shareable unit: route metadata plus stops in delivery order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub route_name: String,
    pub pickup_location_key: String,
    pub date: String,
    pub time: String,
    pub stops: Vec<Stop>,
}

impl Default for Route {
    fn default() -> Self {
        Self {
            route_name: DEFAULT_ROUTE_NAME.to_string(),
            pickup_location_key: DEFAULT_PICKUP_LOCATION_KEY.to_string(),
            date: DEFAULT_DATE.to_string(),
            time: DEFAULT_TIME.to_string(),
            stops: vec![Stop::blank()],
        }
    }
}

impl Route {
    /// Reinserts a single blank stop when the stop list is empty.
    ///
    /// Returns `true` when the repair fired.
    pub fn ensure_stops(&mut self) -> bool {
        if self.stops.is_empty() {
            self.stops.push(Stop::blank());
            true
        } else {
            false
        }
    }

    /// Non-blank stops paired with their delivery number, starting at 1.
    ///
    /// Blank rows are skipped without leaving gaps in the numbering.
    pub fn numbered_stops(&self) -> impl Iterator<Item = (usize, &Stop)> {
        self.stops
            .iter()
            .filter(|stop| !stop.is_blank())
            .enumerate()
            .map(|(idx, stop)| (idx + 1, stop))
    }
}
