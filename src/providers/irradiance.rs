//! Historical irradiance data collaborator.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use super::error::{ProviderError, ProviderResult};
use crate::api::{Coordinates, IrradianceSeries};

/// Source label written into persisted solar records for NASA POWER data.
pub const NASA_POWER_SOURCE: &str = "nasa_power";

/// Fetches a daily two-channel irradiance time series for a location.
#[async_trait]
pub trait IrradianceDataProvider: Send + Sync {
    /// Fetch daily all-sky and clear-sky radiation for the inclusive window.
    ///
    /// # Errors
    /// * `ProviderError::Timeout` - the provider stalled past the deadline
    /// * `ProviderError::Service` - transport failure or malformed payload
    async fn fetch_daily(
        &self,
        coords: Coordinates,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ProviderResult<IrradianceSeries>;

    /// Label identifying this upstream in persisted records.
    fn source_label(&self) -> &str;
}

const NASA_POWER_URL: &str = "https://power.larc.nasa.gov/api/temporal/daily/point";

#[derive(Debug, Deserialize)]
struct PowerResponse {
    properties: PowerProperties,
}

#[derive(Debug, Deserialize)]
struct PowerProperties {
    parameter: PowerParameters,
}

/// The two radiation channels, keyed by `YYYYMMDD` date strings.
#[derive(Debug, Deserialize)]
struct PowerParameters {
    #[serde(rename = "ALLSKY_SFC_SW_DWN")]
    all_sky: BTreeMap<String, f64>,
    #[serde(rename = "CLRSKY_SFC_SW_DWN")]
    clear_sky: BTreeMap<String, f64>,
}

/// Live provider backed by the NASA POWER daily point API.
pub struct NasaPowerProvider {
    client: reqwest::Client,
    base_url: String,
}

impl NasaPowerProvider {
    pub fn new() -> ProviderResult<Self> {
        Ok(Self {
            client: super::build_http_client("solar-potential-app")?,
            base_url: NASA_POWER_URL.to_string(),
        })
    }

    /// Point the provider at a different endpoint (tests, mirrors).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

fn parse_channel(raw: BTreeMap<String, f64>) -> ProviderResult<BTreeMap<NaiveDate, f64>> {
    raw.into_iter()
        .map(|(key, value)| {
            let date = NaiveDate::parse_from_str(&key, "%Y%m%d").map_err(|e| {
                ProviderError::service(format!("bad date key '{}' in POWER reply: {}", key, e))
            })?;
            Ok((date, value))
        })
        .collect()
}

#[async_trait]
impl IrradianceDataProvider for NasaPowerProvider {
    async fn fetch_daily(
        &self,
        coords: Coordinates,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ProviderResult<IrradianceSeries> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("start", start.format("%Y%m%d").to_string()),
                ("end", end.format("%Y%m%d").to_string()),
                ("latitude", coords.latitude.to_string()),
                ("longitude", coords.longitude.to_string()),
                ("community", "re".to_string()),
                (
                    "parameters",
                    "ALLSKY_SFC_SW_DWN,CLRSKY_SFC_SW_DWN".to_string(),
                ),
                ("format", "json".to_string()),
                ("time-standard", "lst".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let payload: PowerResponse = response.json().await?;
        let series = IrradianceSeries {
            all_sky: parse_channel(payload.properties.parameter.all_sky)?,
            clear_sky: parse_channel(payload.properties.parameter.clear_sky)?,
        };

        debug!(
            samples = series.all_sky.len(),
            %start,
            %end,
            "fetched POWER daily series"
        );
        Ok(series)
    }

    fn source_label(&self) -> &str {
        NASA_POWER_SOURCE
    }
}
