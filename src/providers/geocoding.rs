//! Address geocoding collaborator.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::error::{ProviderError, ProviderResult};
use crate::api::Coordinates;

/// Turns free-form address text into geographic coordinates.
#[async_trait]
pub trait GeocodingService: Send + Sync {
    /// Resolve an address to coordinates.
    ///
    /// # Errors
    /// * `ProviderError::NotFound` - no match for the address
    /// * `ProviderError::Timeout` - the provider stalled past the deadline
    /// * `ProviderError::Service` - any other transport or payload failure
    async fn geocode(&self, address: &str) -> ProviderResult<Coordinates>;
}

const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";

/// One search hit from the Nominatim API. Coordinates arrive as strings.
#[derive(Debug, Deserialize)]
struct NominatimHit {
    lat: String,
    lon: String,
}

/// Live geocoder backed by the public Nominatim search endpoint.
pub struct NominatimGeocoder {
    client: reqwest::Client,
    base_url: String,
}

impl NominatimGeocoder {
    pub fn new() -> ProviderResult<Self> {
        Ok(Self {
            client: super::build_http_client("solar-potential-app")?,
            base_url: NOMINATIM_URL.to_string(),
        })
    }

    /// Point the geocoder at a different endpoint (tests, self-hosted mirror).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl GeocodingService for NominatimGeocoder {
    async fn geocode(&self, address: &str) -> ProviderResult<Coordinates> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .send()
            .await?
            .error_for_status()?;

        let hits: Vec<NominatimHit> = response.json().await?;
        let hit = hits
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::not_found(format!("address not found: {}", address)))?;

        let latitude: f64 = hit
            .lat
            .parse()
            .map_err(|e| ProviderError::service(format!("bad latitude in geocoder reply: {}", e)))?;
        let longitude: f64 = hit
            .lon
            .parse()
            .map_err(|e| ProviderError::service(format!("bad longitude in geocoder reply: {}", e)))?;

        debug!(latitude, longitude, "geocoded address");
        Ok(Coordinates {
            latitude,
            longitude,
        })
    }
}
