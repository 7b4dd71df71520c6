//! Financial projection over an aggregated irradiance summary.
//!
//! Pure arithmetic on already-aggregated statistics; no I/O. Computation
//! keeps full precision and rounds once when the result is assembled.

use crate::api::{round2, IrradianceSummary, ProjectionResult, QualityLabel, SystemParams};
use crate::services::resolver::ResolveError;

/// Fixed system-loss constant covering inverter, wiring and soiling losses.
pub const DERATING_FACTOR: f64 = 0.75;

/// Annual electricity-rate escalation used for the 25-year savings total.
pub const RATE_ESCALATION: f64 = 1.02;

/// Horizon of the cumulative savings projection, in years.
pub const SAVINGS_HORIZON_YEARS: u32 = 25;

fn validate(params: &SystemParams) -> Result<(), ResolveError> {
    if !params.system_size_kw.is_finite() || params.system_size_kw <= 0.0 {
        return Err(ResolveError::input("system_size_kw must be positive"));
    }
    if !params.panel_efficiency.is_finite()
        || params.panel_efficiency <= 0.0
        || params.panel_efficiency > 1.0
    {
        return Err(ResolveError::input("panel_efficiency must be in (0, 1]"));
    }
    if !params.electricity_rate.is_finite() || params.electricity_rate < 0.0 {
        return Err(ResolveError::input("electricity_rate must be non-negative"));
    }
    if !params.install_cost_per_watt.is_finite() || params.install_cost_per_watt < 0.0 {
        return Err(ResolveError::input(
            "install_cost_per_watt must be non-negative",
        ));
    }
    Ok(())
}

/// Label the overall data quality from both channel ratios.
///
/// Thresholds are on the percentage scale, so the [0, 1] ratios carried by
/// the summary are normalized before comparison.
fn quality_label(summary: &IrradianceSummary) -> QualityLabel {
    let all_sky_pct = summary.all_sky_quality * 100.0;
    let clear_sky_pct = summary.clear_sky_quality * 100.0;
    if all_sky_pct > 80.0 && clear_sky_pct > 80.0 {
        QualityLabel::High
    } else if all_sky_pct > 60.0 && clear_sky_pct > 60.0 {
        QualityLabel::Medium
    } else {
        QualityLabel::Low
    }
}

/// Project production, cost and savings for an installation.
///
/// # Errors
/// * `ResolveError::Input` - out-of-range system parameters
/// * `ResolveError::DataIntegrity` - the summary has no valid all-sky
///   average to project from; the projection fails loudly rather than
///   pretending zero irradiance
pub fn project(
    summary: &IrradianceSummary,
    params: &SystemParams,
) -> Result<ProjectionResult, ResolveError> {
    validate(params)?;

    let avg_all_sky = summary.avg_all_sky.ok_or_else(|| {
        ResolveError::data_integrity("summary has no valid all-sky average to project from")
    })?;

    let daily_production =
        avg_all_sky * params.system_size_kw * params.panel_efficiency * DERATING_FACTOR;
    let annual_production = daily_production * 365.0;
    let annual_savings = annual_production * params.electricity_rate;
    let system_cost = params.system_size_kw * 1000.0 * params.install_cost_per_watt;

    // Never divide by zero and never report infinity: no savings, no payback.
    let payback_period = if annual_savings > 0.0 {
        Some(system_cost / annual_savings)
    } else {
        None
    };

    let total_savings_25_year: f64 = (0..SAVINGS_HORIZON_YEARS)
        .map(|year| annual_savings * RATE_ESCALATION.powi(year as i32))
        .sum();

    Ok(ProjectionResult {
        daily_production: round2(daily_production),
        annual_production: round2(annual_production),
        annual_savings: round2(annual_savings),
        system_cost: round2(system_cost),
        payback_period: payback_period.map(round2),
        total_savings_25_year: round2(total_savings_25_year),
        overall_quality: quality_label(summary),
    })
}
