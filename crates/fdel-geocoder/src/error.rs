use thiserror::Error;

/// Errors from a single outbound address lookup.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// Network or TLS failure, or a non-2xx status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid geocoder base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("candidate coordinate is not a number: \"{value}\"")]
    InvalidCoordinate { value: String },
}
