//! Cache-backed address resolution.
//!
//! The geocoder lives on a single event-processing thread, so the cache sits
//! in a `RefCell` and `resolve` takes `&self`; several lookups can be in
//! flight at once without any locking. A borrow of the cache is never held
//! across an `.await`.
//!
//! Two concurrent calls for the same uncached address both reach the
//! network. Only completed lookups are memoized.

use std::cell::RefCell;

use crate::cache::{CacheEntry, GeocodeCache};
use crate::client::AddressLookup;
use crate::types::{Coordinate, GeocodeOutcome};

pub struct Geocoder<L> {
    lookup: L,
    cache: RefCell<GeocodeCache>,
}

impl<L: AddressLookup> Geocoder<L> {
    pub fn new(lookup: L) -> Self {
        Self {
            lookup,
            cache: RefCell::new(GeocodeCache::new()),
        }
    }

    /// The memoized outcome for `address`, if any.
    #[must_use]
    pub fn cached(&self, address: &str) -> Option<GeocodeOutcome> {
        self.cache.borrow().lookup(address).map(CacheEntry::to_outcome)
    }

    #[must_use]
    pub fn cache_len(&self) -> usize {
        self.cache.borrow().len()
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Resolves `address`, consulting the cache first.
    ///
    /// A miss issues exactly one search. The first candidate wins and is
    /// cached; an empty candidate list is cached as unresolvable and reported
    /// as [`GeocodeOutcome::NotFound`]. A failed request is also cached as
    /// unresolvable, so it is not retried this session, and reported as
    /// [`GeocodeOutcome::Failed`] with a message naming the address.
    pub async fn resolve(&self, address: &str) -> GeocodeOutcome {
        if let Some(outcome) = self.cached(address) {
            tracing::debug!(address, "geocode cache hit");
            return outcome;
        }

        let result = self.lookup.search(address).await;

        let first = match result {
            Ok(candidates) => candidates.into_iter().next(),
            Err(e) => {
                tracing::warn!(address, error = %e, "geocoding request failed");
                self.remember(address, CacheEntry::Unresolvable);
                return GeocodeOutcome::Failed {
                    message: format!("Geocoding service error.\n\n{address}: {e}"),
                };
            }
        };

        let Some(candidate) = first else {
            tracing::debug!(address, "geocoder returned no candidates");
            self.remember(address, CacheEntry::Unresolvable);
            return GeocodeOutcome::NotFound;
        };

        match candidate.coordinate() {
            Ok(coordinate) => {
                self.remember(
                    address,
                    CacheEntry::Resolved {
                        coordinate,
                        display_address: candidate.display_name.clone(),
                    },
                );
                GeocodeOutcome::Found {
                    coordinate,
                    display_address: candidate.display_name,
                }
            }
            Err(e) => {
                tracing::warn!(address, error = %e, "geocoder returned an unusable candidate");
                self.remember(address, CacheEntry::Unresolvable);
                GeocodeOutcome::Failed {
                    message: format!("Geocoding service error.\n\n{address}: {e}"),
                }
            }
        }
    }

    /// Callback form of [`Geocoder::resolve`].
    ///
    /// `on_success` gets `Some((coordinate, display_address))` or `None` for
    /// "not found"; `on_failure` gets the error message and is the only
    /// callback invoked when the request fails.
    pub async fn resolve_with<S, F>(&self, address: &str, on_success: S, on_failure: F)
    where
        S: FnOnce(Option<(Coordinate, String)>),
        F: FnOnce(String),
    {
        self.resolve(address).await.dispatch(on_success, on_failure);
    }

    fn remember(&self, address: &str, entry: CacheEntry) {
        self.cache.borrow_mut().store(address, entry);
    }
}
