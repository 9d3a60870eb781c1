//! Map Synchronizer: turns a route into paced geocode lookups and places
//! markers as their results come back.
//!
//! Each [`MapSynchronizer::redraw`] clears the layer, bumps a generation
//! counter, and queues one lookup per non-blank stop plus one for the pickup
//! facility. Queued lookups are never cancelled. Instead every job carries
//! the generation it was scheduled under, and anything older than the
//! current generation is dropped when it comes due or when its result lands.

use std::fmt;
use std::time::Duration;

use fdel_core::{LocationRegistry, Route};
use fdel_geocoder::GeocodeOutcome;

use crate::markers::{Marker, MarkerLayer, MarkerSlot, Viewport};
use crate::scheduler::TaskQueue;

/// One scheduled address lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupJob {
    pub generation: u64,
    pub slot: MarkerSlot,
    pub address: String,
    /// Facility name for the pickup marker; `None` for delivery stops.
    pub facility: Option<String>,
}

/// User-visible problem raised while drawing the map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alert {
    AddressNotFound { address: String },
    GeocodeFailed { address: String, message: String },
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alert::AddressNotFound { address } => write!(f, "Cannot find address {address}"),
            Alert::GeocodeFailed { message, .. } => write!(f, "{message}"),
        }
    }
}

/// What happened to a completed lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Placed,
    Alerted,
    /// The result belonged to a superseded redraw.
    Stale,
}

pub struct MapSynchronizer {
    pacing: Duration,
    padding: f64,
    generation: u64,
    queue: TaskQueue<LookupJob>,
    layer: MarkerLayer,
    viewport: Viewport,
    alerts: Vec<Alert>,
}

impl MapSynchronizer {
    /// `pacing` separates consecutive lookups within one redraw; `padding`
    /// is the ratio each fitted bound is grown by.
    #[must_use]
    pub fn new(pacing: Duration, padding: f64) -> Self {
        Self {
            pacing,
            padding,
            generation: 0,
            queue: TaskQueue::new(),
            layer: MarkerLayer::default(),
            viewport: Viewport::default(),
            alerts: Vec::new(),
        }
    }

    /// Clears the markers and schedules a fresh round of lookups.
    ///
    /// The pickup lookup takes slot 0 (no delay); delivery stop `n` runs
    /// `n * pacing` later. Blank stops get neither a slot nor a number. A
    /// pickup key missing from the registry is logged and skipped; the stops
    /// are still drawn. Returns the new generation.
    pub fn redraw(&mut self, route: &Route, locations: &LocationRegistry) -> u64 {
        self.generation += 1;
        self.layer.clear();
        let generation = self.generation;

        match locations.get(&route.pickup_location_key) {
            Some(pickup) => {
                self.schedule(
                    0,
                    LookupJob {
                        generation,
                        slot: MarkerSlot::Pickup,
                        address: pickup.address.clone(),
                        facility: Some(pickup.name.clone()),
                    },
                );
            }
            None => {
                tracing::warn!(
                    key = %route.pickup_location_key,
                    "pickup location not in registry, drawing stops only"
                );
            }
        }

        let mut scheduled = 0usize;
        for (number, stop) in route.numbered_stops() {
            self.schedule(
                number,
                LookupJob {
                    generation,
                    slot: MarkerSlot::Stop(number),
                    address: stop.address.clone(),
                    facility: None,
                },
            );
            scheduled += 1;
        }

        tracing::info!(generation, stops = scheduled, "map redraw scheduled");
        generation
    }

    /// Clears the markers and retires every queued or in-flight lookup
    /// without scheduling new ones. Returns the new generation.
    pub fn invalidate(&mut self) -> u64 {
        self.generation += 1;
        self.layer.clear();
        tracing::debug!(generation = self.generation, "map invalidated");
        self.generation
    }

    fn schedule(&mut self, position: usize, job: LookupJob) {
        let steps = u32::try_from(position).unwrap_or(u32::MAX);
        let delay = self.pacing.saturating_mul(steps);
        tracing::debug!(
            generation = job.generation,
            address = %job.address,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            "geocode scheduled"
        );
        self.queue.schedule(delay, job);
    }

    /// Virtual time at which the next queued lookup comes due.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.queue.next_due()
    }

    #[must_use]
    pub fn now(&self) -> Duration {
        self.queue.now()
    }

    /// Advances to `time` and returns the lookups to issue now. Jobs from
    /// superseded redraws are dropped here rather than sent.
    pub fn take_due(&mut self, time: Duration) -> Vec<LookupJob> {
        let current = self.generation;
        self.queue
            .advance_to(time)
            .into_iter()
            .filter(|job| {
                let live = job.generation == current;
                if !live {
                    tracing::debug!(
                        generation = job.generation,
                        current,
                        address = %job.address,
                        "dropping stale lookup"
                    );
                }
                live
            })
            .collect()
    }

    /// Applies a finished lookup to the map.
    ///
    /// A hit places the marker and refits the view around every marker so
    /// far; a miss or failure raises an alert and leaves the rest of the
    /// round untouched.
    pub fn apply(&mut self, job: &LookupJob, outcome: GeocodeOutcome) -> Applied {
        if job.generation != self.generation {
            tracing::debug!(
                generation = job.generation,
                current = self.generation,
                address = %job.address,
                "discarding stale geocode result"
            );
            return Applied::Stale;
        }

        match outcome {
            GeocodeOutcome::Found {
                coordinate,
                display_address,
            } => {
                let title = match &job.facility {
                    Some(name) => format!("{name}: {display_address}"),
                    None => display_address,
                };
                self.layer.place(Marker {
                    slot: job.slot,
                    position: coordinate,
                    title,
                });
                if let Some(bounds) = self.layer.bounds() {
                    self.viewport = Viewport::Fitted(bounds.pad(self.padding));
                }
                Applied::Placed
            }
            GeocodeOutcome::NotFound => {
                tracing::warn!(address = %job.address, "address not found");
                self.alerts.push(Alert::AddressNotFound {
                    address: job.address.clone(),
                });
                Applied::Alerted
            }
            GeocodeOutcome::Failed { message } => {
                tracing::warn!(address = %job.address, %message, "geocode failed");
                self.alerts.push(Alert::GeocodeFailed {
                    address: job.address.clone(),
                    message,
                });
                Applied::Alerted
            }
        }
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn layer(&self) -> &MarkerLayer {
        &self.layer
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Queued lookups, stale ones included.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Drains alerts raised since the last call.
    pub fn take_alerts(&mut self) -> Vec<Alert> {
        std::mem::take(&mut self.alerts)
    }
}

#[cfg(test)]
#[path = "synchronizer_test.rs"]
mod tests;
