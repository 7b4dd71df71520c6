//! Public API surface for the solar backend.
//!
//! This file consolidates the domain types and DTOs shared by the service,
//! store and HTTP layers. All types derive Serialize/Deserialize for JSON
//! serialization.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sentinel marking a missing/invalid reading in the raw irradiance series.
pub const MISSING_VALUE: f64 = -999.0;

/// User identifier (v4 uuid issued on first submission).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(value: impl Into<String>) -> Self {
        UserId(value.into())
    }

    /// Issue a fresh random identifier.
    pub fn random() -> Self {
        UserId(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Postal address submitted by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    /// Coarse spatial key shared across users for solar-data reuse.
    pub postal_code: String,
    pub country: String,
}

impl Address {
    /// Single-line form handed to the geocoder.
    pub fn to_query(&self) -> String {
        format!(
            "{}, {}, {} {}, {}",
            self.street, self.city, self.state, self.postal_code, self.country
        )
    }
}

/// Address row as persisted in the record store (one per user, immutable).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRecord {
    pub user_id: UserId,
    pub address: Address,
}

/// Browser metadata captured alongside a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserMeta {
    pub user_agent: String,
    pub screen_resolution: String,
    pub language_preference: String,
    pub time_zone: String,
    pub referrer_url: String,
    pub device_type: String,
}

/// Geographic coordinates in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Raw two-channel daily irradiance time series as fetched from the provider.
///
/// Values are kWh/m²/day; entries equal to [`MISSING_VALUE`] are invalid and
/// must be excluded from every aggregate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IrradianceSeries {
    /// Measured all-sky downward shortwave radiation.
    pub all_sky: BTreeMap<NaiveDate, f64>,
    /// Theoretical cloudless clear-sky radiation.
    pub clear_sky: BTreeMap<NaiveDate, f64>,
}

/// Derived irradiance statistics for one location and fetch window.
///
/// Monthly arrays always hold exactly 12 entries (January first); months with
/// no valid samples report 0.0, which is a defined default and distinct from
/// a missing average. Quality ratios are fractions in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrradianceSummary {
    pub avg_all_sky: Option<f64>,
    pub avg_clear_sky: Option<f64>,
    pub monthly_all_sky: [f64; 12],
    pub monthly_clear_sky: [f64; 12],
    pub all_sky_quality: f64,
    pub clear_sky_quality: f64,
    pub best_all_sky: Option<f64>,
    pub worst_all_sky: Option<f64>,
    pub best_clear_sky: Option<f64>,
    pub worst_clear_sky: Option<f64>,
    /// Coordinates the series was fetched for. Optional so that legacy rows
    /// without them can be detected instead of silently defaulted.
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
}

/// Persisted solar-data row: one per live fetch, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolarRecord {
    pub user_id: UserId,
    /// The [`IrradianceSummary`] serialized as JSON text.
    pub summary_json: String,
    pub time_zone: Option<String>,
    /// Label of the upstream that produced the data (e.g. "nasa_power").
    pub source: String,
    pub computed_date: NaiveDate,
}

/// Where a resolved summary came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionSource {
    Cache,
    Live,
}

impl std::fmt::Display for ResolutionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolutionSource::Cache => f.write_str("cache"),
            ResolutionSource::Live => f.write_str("live"),
        }
    }
}

/// Outcome of a lookup resolution: the summary to use plus provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedSolar {
    pub summary: IrradianceSummary,
    pub time_zone: Option<String>,
    pub source: ResolutionSource,
}

/// Installation parameters for the financial projection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SystemParams {
    /// Rated system size in kW.
    pub system_size_kw: f64,
    /// Panel efficiency as a fraction (e.g. 0.20).
    pub panel_efficiency: f64,
    /// Electricity price in $/kWh.
    pub electricity_rate: f64,
    /// Installation cost in $/W.
    pub install_cost_per_watt: f64,
}

/// Overall data-quality label derived from both channel quality ratios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityLabel {
    High,
    Medium,
    Low,
}

/// Financial projection for an installation. Derived value, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Average daily production in kWh.
    pub daily_production: f64,
    /// Production over a 365-day year in kWh.
    pub annual_production: f64,
    /// First-year savings in $.
    pub annual_savings: f64,
    /// Up-front system cost in $.
    pub system_cost: f64,
    /// Simple payback in years; None when annual savings are not positive.
    pub payback_period: Option<f64>,
    /// Cumulative 25-year savings at 2% annual rate escalation.
    pub total_savings_25_year: f64,
    pub overall_quality: QualityLabel,
}

/// Round a value to the 2-decimal display precision used at API boundaries.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round a fraction to 4 decimals so its percent form keeps 2 decimals.
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
