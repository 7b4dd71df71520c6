//! Data Transfer Objects for the HTTP API.
//!
//! Request DTOs mirror the wire format the original frontend sends
//! (camelCase, `zip` for the postal code); response DTOs expose the
//! resolved summary and projection in snake_case.

use serde::{Deserialize, Serialize};

use crate::api::{
    Address, BrowserMeta, IrradianceSummary, ProjectionResult, QualityLabel, ResolutionSource,
    ResolvedSolar, SystemParams, UserId,
};

/// Unit of every irradiance figure in the API.
pub const IRRADIANCE_UNIT: &str = "kWh/m^2/day";

/// Address as submitted by the frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressDto {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
}

impl From<AddressDto> for Address {
    fn from(dto: AddressDto) -> Self {
        Address {
            street: dto.street,
            city: dto.city,
            state: dto.state,
            postal_code: dto.zip,
            country: dto.country,
        }
    }
}

/// Request body for a user-data submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    pub address: AddressDto,
    pub browser_data: BrowserMeta,
}

/// Response for a user-data submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub user_id: UserId,
}

/// Request body for the solar-potential endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolarPotentialRequest {
    pub user_id: UserId,
}

/// Request body for the solar-calculation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolarCalculationRequest {
    pub user_id: UserId,
    /// Rated system size in kW.
    #[serde(default = "default_system_size")]
    pub system_size: f64,
    /// Panel efficiency as a fraction.
    #[serde(default = "default_panel_efficiency")]
    pub panel_efficiency: f64,
    /// Electricity price in $/kWh.
    pub electricity_rate: f64,
    /// Installation cost in $/W.
    #[serde(default = "default_install_cost")]
    pub installation_cost_per_watt: f64,
}

fn default_system_size() -> f64 {
    7.0
}

fn default_panel_efficiency() -> f64 {
    0.20
}

fn default_install_cost() -> f64 {
    3.0
}

impl SolarCalculationRequest {
    pub fn system_params(&self) -> SystemParams {
        SystemParams {
            system_size_kw: self.system_size,
            panel_efficiency: self.panel_efficiency,
            electricity_rate: self.electricity_rate,
            install_cost_per_watt: self.installation_cost_per_watt,
        }
    }
}

/// Resolved solar data as served to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolarDataDto {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub avg_all_sky_radiation: Option<f64>,
    pub avg_clear_sky_radiation: Option<f64>,
    /// Quality ratios as fractions in [0, 1].
    pub all_sky_quality: f64,
    pub clear_sky_quality: f64,
    pub monthly_all_sky: [f64; 12],
    pub monthly_clear_sky: [f64; 12],
    pub best_all_sky: Option<f64>,
    pub worst_all_sky: Option<f64>,
    pub best_clear_sky: Option<f64>,
    pub worst_clear_sky: Option<f64>,
    pub unit: String,
    pub period: String,
    pub time_zone: Option<String>,
    pub source: ResolutionSource,
}

impl From<ResolvedSolar> for SolarDataDto {
    fn from(resolved: ResolvedSolar) -> Self {
        let ResolvedSolar {
            summary,
            time_zone,
            source,
        } = resolved;
        let period = describe_period(&summary);
        SolarDataDto {
            latitude: summary.latitude,
            longitude: summary.longitude,
            avg_all_sky_radiation: summary.avg_all_sky,
            avg_clear_sky_radiation: summary.avg_clear_sky,
            all_sky_quality: summary.all_sky_quality,
            clear_sky_quality: summary.clear_sky_quality,
            monthly_all_sky: summary.monthly_all_sky,
            monthly_clear_sky: summary.monthly_clear_sky,
            best_all_sky: summary.best_all_sky,
            worst_all_sky: summary.worst_all_sky,
            best_clear_sky: summary.best_clear_sky,
            worst_clear_sky: summary.worst_clear_sky,
            unit: IRRADIANCE_UNIT.to_string(),
            period,
            time_zone,
            source,
        }
    }
}

fn describe_period(summary: &IrradianceSummary) -> String {
    format!(
        "daily average ({} to {})",
        summary.period_start.format("%Y-%m-%d"),
        summary.period_end.format("%Y-%m-%d")
    )
}

/// Response for the solar-calculation endpoint: projection merged with the
/// resolved solar data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolarCalculationResponse {
    pub daily_production: f64,
    pub annual_production: f64,
    pub annual_savings: f64,
    pub system_cost: f64,
    pub payback_period: Option<f64>,
    pub total_savings_25_years: f64,
    pub overall_data_quality: QualityLabel,
    pub solar_data: SolarDataDto,
}

impl SolarCalculationResponse {
    pub fn new(projection: ProjectionResult, solar_data: SolarDataDto) -> Self {
        Self {
            daily_production: projection.daily_production,
            annual_production: projection.annual_production,
            annual_savings: projection.annual_savings,
            system_cost: projection.system_cost,
            payback_period: projection.payback_period,
            total_savings_25_years: projection.total_savings_25_year,
            overall_data_quality: projection.overall_quality,
            solar_data,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
}
