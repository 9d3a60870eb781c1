//! HTTP client for the Nominatim search endpoint.
//!
//! Every query is confined to one country and city; the caller's address
//! text goes into the `street` parameter. The service returns a JSON array of
//! candidates, best match first.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::GeocodeError;
use crate::types::Candidate;

pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org/";

/// One outbound address search. The seam between [`crate::Geocoder`] and the
/// network, so the geocoder can be driven by a fake in tests.
pub trait AddressLookup {
    fn search(&self, address: &str)
        -> impl Future<Output = Result<Vec<Candidate>, GeocodeError>>;
}

/// Client for Nominatim's `/search` endpoint.
///
/// Use [`NominatimClient::new`] for the public service or
/// [`NominatimClient::with_base_url`] to point at a mock server in tests.
pub struct NominatimClient {
    client: Client,
    search_url: Url,
    country: String,
    city: String,
}

impl NominatimClient {
    /// Creates a client pointed at the public Nominatim instance.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        country: &str,
        city: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, GeocodeError> {
        Self::with_base_url(DEFAULT_BASE_URL, country, city, timeout_secs, user_agent)
    }

    /// Creates a client with a custom base URL.
    ///
    /// Nominatim's usage policy requires an identifying `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GeocodeError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        base_url: &str,
        country: &str,
        city: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let normalised = format!("{}/search", base_url.trim_end_matches('/'));
        let search_url = Url::parse(&normalised).map_err(|e| GeocodeError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            search_url,
            country: country.to_owned(),
            city: city.to_owned(),
        })
    }

    /// Builds the search URL; `query_pairs_mut` takes care of escaping.
    fn build_url(&self, address: &str) -> Url {
        let mut url = self.search_url.clone();
        url.query_pairs_mut()
            .append_pair("format", "json")
            .append_pair("country", &self.country)
            .append_pair("city", &self.city)
            .append_pair("street", address);
        url
    }
}

impl AddressLookup for NominatimClient {
    /// Sends one GET and parses the candidate list.
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::Http`] on network failure or a non-2xx status.
    /// - [`GeocodeError::Deserialize`] if the body is not a candidate array.
    async fn search(&self, address: &str) -> Result<Vec<Candidate>, GeocodeError> {
        let url = self.build_url(address);
        tracing::debug!(%url, "nominatim search");

        let response = self.client.get(url).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| GeocodeError::Deserialize {
            context: format!("nominatim search for \"{address}\""),
            source: e,
        })
    }
}
