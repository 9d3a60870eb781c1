//! Static registry of pickup facilities.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const BUILTIN_LOCATIONS: &str = include_str!("../locations.yaml");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub address: String,
}

#[derive(Debug, Deserialize)]
struct LocationEntry {
    key: String,
    name: String,
    address: String,
}

#[derive(Debug, Deserialize)]
struct LocationsFile {
    locations: Vec<LocationEntry>,
}

/// Read-only mapping from pickup key to facility.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationRegistry {
    entries: BTreeMap<String, Location>,
}

impl LocationRegistry {
    /// The registry compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` only if the bundled YAML is invalid.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_yaml_str(BUILTIN_LOCATIONS)
    }

    /// Load and validate a registry from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LocationsFileIo {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_yaml_str(&content)
    }

    /// # Errors
    ///
    /// Returns `ConfigError` if the YAML cannot be parsed or fails validation.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let file: LocationsFile =
            serde_yaml::from_str(content).map_err(ConfigError::LocationsFileParse)?;
        validate_locations(&file)?;

        let entries = file
            .locations
            .into_iter()
            .map(|entry| {
                (
                    entry.key,
                    Location {
                        name: entry.name,
                        address: entry.address,
                    },
                )
            })
            .collect();
        Ok(Self { entries })
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Location> {
        self.entries.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
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

impl FromIterator<(String, Location)> for LocationRegistry {
    fn from_iter<I: IntoIterator<Item = (String, Location)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

fn validate_locations(file: &LocationsFile) -> Result<(), ConfigError> {
    let mut seen_keys = HashSet::new();

    for entry in &file.locations {
        if entry.key.trim().is_empty() {
            return Err(ConfigError::Validation(
                "location key must be non-empty".to_string(),
            ));
        }

        if entry.name.trim().is_empty() || entry.address.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "location '{}' needs both a name and an address",
                entry.key
            )));
        }

        if !seen_keys.insert(entry.key.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate location key: '{}'",
                entry.key
            )));
        }
    }

    Ok(())
}
