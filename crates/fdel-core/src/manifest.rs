//! Computed data behind the printable manifest: numbered stops, totals, and
//! the resolved pickup facility. Layout is left to the caller.

use chrono::NaiveDate;
use thiserror::Error;

use crate::locations::{Location, LocationRegistry};
use crate::route::Route;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ManifestError {
    #[error("pickup location \"{key}\" is not in the location registry")]
    MissingLocationKey { key: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    /// Non-blank stops, including ones with a zero quantity.
    pub stop_count: usize,
    pub total_quantity: u64,
}

impl Totals {
    /// Picks the unit label for the summed quantity.
    #[must_use]
    pub fn unit_label<'a>(&self, singular: &'a str, plural: &'a str) -> &'a str {
        if self.total_quantity == 1 {
            singular
        } else {
            plural
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestLine {
    pub number: usize,
    pub address: String,
    pub quantity: u32,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestSummary {
    pub route_name: String,
    pub date: String,
    /// Long-form date when `date` parses as `YYYY-MM-DD`.
    pub display_date: Option<String>,
    pub time: String,
    pub pickup: Location,
    pub lines: Vec<ManifestLine>,
    pub totals: Totals,
}

impl ManifestSummary {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Sums non-blank stops.
#[must_use]
pub fn totals(route: &Route) -> Totals {
    route
        .numbered_stops()
        .fold(Totals::default(), |acc, (_, stop)| Totals {
            stop_count: acc.stop_count + 1,
            total_quantity: acc.total_quantity + u64::from(stop.quantity),
        })
}

/// Builds the manifest for `route`.
///
/// # Errors
///
/// Returns [`ManifestError::MissingLocationKey`] when the route's pickup key
/// is not registered; there is no sensible facility summary without it.
pub fn build_manifest(
    route: &Route,
    locations: &LocationRegistry,
) -> Result<ManifestSummary, ManifestError> {
    let pickup = locations
        .get(&route.pickup_location_key)
        .cloned()
        .ok_or_else(|| ManifestError::MissingLocationKey {
            key: route.pickup_location_key.clone(),
        })?;

    let lines = route
        .numbered_stops()
        .map(|(number, stop)| ManifestLine {
            number,
            address: stop.address.clone(),
            quantity: stop.quantity,
            notes: stop.notes.clone(),
        })
        .collect();

    Ok(ManifestSummary {
        route_name: route.route_name.clone(),
        date: route.date.clone(),
        display_date: format_date(&route.date),
        time: route.time.clone(),
        pickup,
        lines,
        totals: totals(route),
    })
}

fn format_date(raw: &str) -> Option<String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .ok()
        .map(|date| date.format("%A, %B %-d, %Y").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::Stop;

    fn registry() -> LocationRegistry {
        [(
            "ofb".to_string(),
            Location {
                name: "Food Bank".to_string(),
                address: "1 Main St".to_string(),
            },
        )]
        .into_iter()
        .collect()
    }

    fn route_with(stops: Vec<Stop>) -> Route {
        Route {
            route_name: "East".to_string(),
            pickup_location_key: "ofb".to_string(),
            date: "2026-10-17".to_string(),
            time: "10:00".to_string(),
            stops,
        }
    }

    #[test]
    fn totals_skip_blank_and_addressless_rows() {
        let route = route_with(vec![
            Stop::new("12 Elm St", 2, ""),
            Stop::new("", 0, ""),
            Stop::blank(),
            Stop::new("400 Bank St", 3, ""),
        ]);
        assert_eq!(
            totals(&route),
            Totals {
                stop_count: 2,
                total_quantity: 5,
            }
        );
    }

    #[test]
    fn zero_quantity_stop_with_address_still_counts() {
        let route = route_with(vec![Stop::new("12 Elm St", 0, ""), Stop::new("9 Oak", 4, "")]);
        assert_eq!(
            totals(&route),
            Totals {
                stop_count: 2,
                total_quantity: 4,
            }
        );
    }

    #[test]
    fn unit_label_is_singular_only_for_exactly_one() {
        let one = Totals {
            stop_count: 1,
            total_quantity: 1,
        };
        let zero = Totals::default();
        let many = Totals {
            stop_count: 1,
            total_quantity: 7,
        };
        assert_eq!(one.unit_label("box", "boxes"), "box");
        assert_eq!(zero.unit_label("box", "boxes"), "boxes");
        assert_eq!(many.unit_label("box", "boxes"), "boxes");
    }

    #[test]
    fn manifest_numbers_non_blank_stops_sequentially() {
        let route = route_with(vec![
            Stop::new("A", 1, "n1"),
            Stop::blank(),
            Stop::new("B", 2, ""),
        ]);
        let manifest = build_manifest(&route, &registry()).unwrap();
        let numbers: Vec<(usize, &str)> = manifest
            .lines
            .iter()
            .map(|l| (l.number, l.address.as_str()))
            .collect();
        assert_eq!(numbers, vec![(1, "A"), (2, "B")]);
        assert_eq!(manifest.pickup.name, "Food Bank");
        assert_eq!(
            manifest.display_date.as_deref(),
            Some("Saturday, October 17, 2026")
        );
    }

    #[test]
    fn manifest_fails_on_unknown_pickup_key() {
        let mut route = route_with(vec![Stop::new("A", 1, "")]);
        route.pickup_location_key = "nowhere".to_string();
        assert_eq!(
            build_manifest(&route, &registry()).unwrap_err(),
            ManifestError::MissingLocationKey {
                key: "nowhere".to_string()
            }
        );
    }

    #[test]
    fn manifest_for_placeholder_only_route_is_empty() {
        let route = route_with(vec![Stop::blank()]);
        let manifest = build_manifest(&route, &registry()).unwrap();
        assert!(manifest.is_empty());
        assert_eq!(manifest.totals, Totals::default());
    }

    #[test]
    fn free_text_date_has_no_display_form() {
        let mut route = route_with(vec![Stop::new("A", 1, "")]);
        route.date = "next Tuesday".to_string();
        let manifest = build_manifest(&route, &registry()).unwrap();
        assert!(manifest.display_date.is_none());
    }
}
