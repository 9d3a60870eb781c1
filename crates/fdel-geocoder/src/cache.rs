//! Session-scoped memo of address lookups.
//!
//! Keys are the raw address text, matched exactly. Entries never expire and
//! the map is never evicted.

use std::collections::HashMap;

use crate::types::{Coordinate, GeocodeOutcome};

#[derive(Debug, Clone, PartialEq)]
pub enum CacheEntry {
    Resolved {
        coordinate: Coordinate,
        display_address: String,
    },
    /// The address had no candidates or its lookup failed.
    Unresolvable,
}

impl CacheEntry {
    /// A cached negative always reads back as "not found", whatever caused it.
    #[must_use]
    pub fn to_outcome(&self) -> GeocodeOutcome {
        match self {
            CacheEntry::Resolved {
                coordinate,
                display_address,
            } => GeocodeOutcome::Found {
                coordinate: *coordinate,
                display_address: display_address.clone(),
            },
            CacheEntry::Unresolvable => GeocodeOutcome::NotFound,
        }
    }
}

#[derive(Debug, Default)]
pub struct GeocodeCache {
    entries: HashMap<String, CacheEntry>,
}

impl GeocodeCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn lookup(&self, address: &str) -> Option<&CacheEntry> {
        self.entries.get(address)
    }

    pub fn store(&mut self, address: &str, entry: CacheEntry) {
        self.entries.insert(address.to_owned(), entry);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
