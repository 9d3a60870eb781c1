pub mod app_config;
pub mod config;
pub mod form;
pub mod locations;
pub mod locator;
pub mod manifest;
pub mod route;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use form::{
    apply_to_form, scan_and_repair, scan_form, Field, FieldKind, FieldSpec, Form, FormRow,
    ScanError, Scanned,
};
pub use locations::{Location, LocationRegistry};
pub use locator::{decode, decode_or_default, encode, share_link, LocatorError};
pub use manifest::{build_manifest, totals, ManifestError, ManifestLine, ManifestSummary, Totals};
pub use route::{Route, Stop};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read locations file {path}: {source}")]
    LocationsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse locations file: {0}")]
    LocationsFileParse(#[source] serde_yaml::Error),

    #[error("locations validation failed: {0}")]
    Validation(String),
}
