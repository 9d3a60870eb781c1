//! Marker layer and view bounds.
//!
//! Markers are keyed by slot rather than kept in arrival order, and bounds
//! are a min/max fold, so the layer ends up identical whatever order lookups
//! complete in.

use std::collections::BTreeMap;

use fdel_geocoder::Coordinate;

/// Where the map starts before any marker has been placed.
pub const DEFAULT_CENTER: Coordinate = Coordinate::new(45.42, -75.69);
pub const DEFAULT_ZOOM: u8 = 13;

/// Identity of a marker within one redraw. The pickup sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MarkerSlot {
    Pickup,
    /// Delivery number, counting non-blank stops from 1.
    Stop(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub slot: MarkerSlot,
    pub position: Coordinate,
    /// Hover text: the resolved display address, prefixed by the facility
    /// name for the pickup.
    pub title: String,
}

impl Marker {
    /// Glyph shown on the pin: a package for the pickup, the delivery number
    /// otherwise.
    #[must_use]
    pub fn glyph(&self) -> String {
        match self.slot {
            MarkerSlot::Pickup => "package".to_string(),
            MarkerSlot::Stop(number) => number.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    #[must_use]
    pub fn around(point: Coordinate) -> Self {
        Self {
            south: point.lat,
            west: point.lon,
            north: point.lat,
            east: point.lon,
        }
    }

    #[must_use]
    pub fn extend(self, point: Coordinate) -> Self {
        Self {
            south: self.south.min(point.lat),
            west: self.west.min(point.lon),
            north: self.north.max(point.lat),
            east: self.east.max(point.lon),
        }
    }

    /// Grows each side by `ratio` of the current height or width.
    #[must_use]
    pub fn pad(self, ratio: f64) -> Self {
        let lat_buffer = (self.north - self.south).abs() * ratio;
        let lon_buffer = (self.east - self.west).abs() * ratio;
        Self {
            south: self.south - lat_buffer,
            west: self.west - lon_buffer,
            north: self.north + lat_buffer,
            east: self.east + lon_buffer,
        }
    }

    #[must_use]
    pub fn contains(&self, point: Coordinate) -> bool {
        (self.south..=self.north).contains(&point.lat) && (self.west..=self.east).contains(&point.lon)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Viewport {
    Initial { center: Coordinate, zoom: u8 },
    Fitted(Bounds),
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport::Initial {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        }
    }
}

/// The disposable set of pins for the current route.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerLayer {
    markers: BTreeMap<MarkerSlot, Marker>,
}

impl MarkerLayer {
    pub fn clear(&mut self) {
        self.markers.clear();
    }

    /// Places `marker`, replacing any marker already in its slot.
    pub fn place(&mut self, marker: Marker) {
        self.markers.insert(marker.slot, marker);
    }

    #[must_use]
    pub fn get(&self, slot: MarkerSlot) -> Option<&Marker> {
        self.markers.get(&slot)
    }

    /// Markers ordered pickup first, then by delivery number.
    pub fn iter(&self) -> impl Iterator<Item = &Marker> {
        self.markers.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Smallest box holding every marker, or `None` for an empty layer.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        let mut positions = self.markers.values().map(|m| m.position);
        let first = positions.next()?;
        Some(positions.fold(Bounds::around(first), Bounds::extend))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(number: usize, lat: f64, lon: f64) -> Marker {
        Marker {
            slot: MarkerSlot::Stop(number),
            position: Coordinate::new(lat, lon),
            title: format!("stop {number}"),
        }
    }

    #[test]
    fn empty_layer_has_no_bounds() {
        assert!(MarkerLayer::default().bounds().is_none());
    }

    #[test]
    fn bounds_cover_all_markers() {
        let mut layer = MarkerLayer::default();
        layer.place(stop(1, 45.0, -75.0));
        layer.place(stop(2, 46.0, -76.0));
        assert_eq!(
            layer.bounds(),
            Some(Bounds {
                south: 45.0,
                west: -76.0,
                north: 46.0,
                east: -75.0,
            })
        );
    }

    #[test]
    fn pad_grows_each_side_by_ratio() {
        let padded = Bounds {
            south: 45.0,
            west: -76.0,
            north: 46.0,
            east: -74.0,
        }
        .pad(0.25);
        assert_eq!(
            padded,
            Bounds {
                south: 44.75,
                west: -76.5,
                north: 46.25,
                east: -73.5,
            }
        );
    }

    #[test]
    fn single_point_padding_is_degenerate() {
        let b = Bounds::around(Coordinate::new(45.0, -75.0)).pad(0.25);
        assert!(b.contains(Coordinate::new(45.0, -75.0)));
        assert!((b.north - b.south).abs() < f64::EPSILON);
    }

    #[test]
    fn placement_order_does_not_change_layer() {
        let mut ab = MarkerLayer::default();
        ab.place(stop(1, 45.0, -75.0));
        ab.place(stop(2, 46.0, -76.0));

        let mut ba = MarkerLayer::default();
        ba.place(stop(2, 46.0, -76.0));
        ba.place(stop(1, 45.0, -75.0));

        assert_eq!(ab, ba);
        assert_eq!(ab.bounds(), ba.bounds());
    }

    #[test]
    fn pickup_iterates_first() {
        let mut layer = MarkerLayer::default();
        layer.place(stop(1, 45.0, -75.0));
        layer.place(Marker {
            slot: MarkerSlot::Pickup,
            position: Coordinate::new(45.5, -75.5),
            title: "Depot".to_string(),
        });
        let glyphs: Vec<String> = layer.iter().map(Marker::glyph).collect();
        assert_eq!(glyphs, vec!["package".to_string(), "1".to_string()]);
    }
}
