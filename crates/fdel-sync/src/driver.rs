//! Event loop that runs a synchronizer's queued lookups against a real
//! geocoder.
//!
//! Single task, no spawning: the loop sleeps until the next lookup is due,
//! starts it, and applies results in whatever order they complete. Lookups
//! overlap when the service is slower than the pacing interval.

use futures::stream::{FuturesUnordered, StreamExt};
use tokio::time::Instant;

use fdel_geocoder::{AddressLookup, Geocoder};

use crate::synchronizer::MapSynchronizer;

/// Runs until no lookup is queued or in flight.
///
/// The synchronizer's current virtual time is pinned to the call instant,
/// so jobs queued by the latest redraw keep their pacing relative to it.
pub async fn run_until_idle<L: AddressLookup>(
    sync: &mut MapSynchronizer,
    geocoder: &Geocoder<L>,
) {
    let origin = Instant::now()
        .checked_sub(sync.now())
        .unwrap_or_else(Instant::now);
    let mut in_flight = FuturesUnordered::new();

    loop {
        let next_due = sync.next_due();
        if next_due.is_none() && in_flight.is_empty() {
            break;
        }

        tokio::select! {
            Some((job, outcome)) = in_flight.next(), if !in_flight.is_empty() => {
                sync.apply(&job, outcome);
            }
            () = sleep_until_due(origin, next_due) => {
                let Some(due) = next_due else { continue };
                for job in sync.take_due(due) {
                    tracing::debug!(address = %job.address, "geocode dispatched");
                    in_flight.push(async move {
                        let outcome = geocoder.resolve(&job.address).await;
                        (job, outcome)
                    });
                }
            }
        }
    }

    tracing::info!(
        generation = sync.generation(),
        markers = sync.layer().len(),
        "map redraw settled"
    );
}

async fn sleep_until_due(origin: Instant, due: Option<std::time::Duration>) {
    match due {
        Some(due) => tokio::time::sleep_until(origin + due).await,
        None => std::future::pending().await,
    }
}
