//! External collaborators consumed by the lookup resolver.
//!
//! Each collaborator is a narrow async trait with a live HTTP implementation.
//! The resolver receives trait objects via its constructor so tests can
//! substitute mocks and no module-level client state exists.

pub mod error;
pub mod geocoding;
pub mod irradiance;
pub mod timezone;

pub use error::{ProviderError, ProviderResult};
pub use geocoding::{GeocodingService, NominatimGeocoder};
pub use irradiance::{IrradianceDataProvider, NasaPowerProvider, NASA_POWER_SOURCE};
pub use timezone::{LongitudeTimeZoneResolver, TimeZoneResolver};

use std::time::Duration;

/// Bounded timeout applied to every upstream HTTP call.
pub(crate) const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(20);

/// Build the shared HTTP client used by the live providers.
pub(crate) fn build_http_client(user_agent: &str) -> ProviderResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(UPSTREAM_TIMEOUT)
        .user_agent(user_agent)
        .build()
        .map_err(|e| ProviderError::service(format!("failed to build HTTP client: {}", e)))
}
