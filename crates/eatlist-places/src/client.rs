//! HTTP client for the Google Places "Place Details" endpoint.
//!
//! Wraps `reqwest` with API key management and typed response decoding.
//! API-level statuses are returned to the caller untouched; only transport
//! and decoding problems surface as [`PlacesError`].

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::PlacesError;
use crate::types::DetailsResponse;

/// Fields requested for every lookup. Billing is per field group, so the
/// mask stays fixed.
pub const DETAILS_FIELDS: &str = "name,formatted_address,geometry/location,opening_hours,\
utc_offset,website,formatted_phone_number,url,business_status";

/// Client for the Places Details API.
///
/// Use [`PlacesClient::with_base_url`] with the configured base URL; tests
/// point it at a wiremock server.
pub struct PlacesClient {
    client: Client,
    api_key: String,
    details_url: Url,
}

impl PlacesClient {
    /// Creates a new client rooted at `base_url`
    /// (e.g. `https://maps.googleapis.com/maps/api/place`).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so `join` appends instead of replacing
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let details_url = Url::parse(&normalised)
            .and_then(|base| base.join("details/json"))
            .map_err(|e| PlacesError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            details_url,
        })
    }

    /// Looks up one place by its identifier.
    ///
    /// A non-`OK` API status is *not* an error: inspect
    /// [`DetailsResponse::status`] on the returned value.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Http`] on network failure or non-2xx HTTP status.
    ///   The request URL carries the API key, so it is stripped from the error.
    /// - [`PlacesError::Deserialize`] if the body is not a details envelope.
    pub async fn place_details(&self, place_id: &str) -> Result<DetailsResponse, PlacesError> {
        let url = self.build_url(place_id);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;
        let response = response
            .error_for_status()
            .map_err(reqwest::Error::without_url)?;
        let body = response
            .text()
            .await
            .map_err(reqwest::Error::without_url)?;

        serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
            context: format!("place details (place_id={place_id})"),
            source: e,
        })
    }

    /// Builds the details request URL with percent-encoded query parameters.
    fn build_url(&self, place_id: &str) -> Url {
        let mut url = self.details_url.clone();
        url.query_pairs_mut()
            .append_pair("place_id", place_id)
            .append_pair("fields", DETAILS_FIELDS)
            .append_pair("key", &self.api_key);
        url
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
