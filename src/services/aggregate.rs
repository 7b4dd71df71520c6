//! Irradiance aggregation: raw daily series to summary statistics.
//!
//! The two channels are filtered and aggregated independently; a sentinel
//! value in one channel never affects the other. Internal computation keeps
//! full precision; rounding to display precision happens once, when the
//! summary is assembled.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::api::{round2, round4, Coordinates, IrradianceSeries, IrradianceSummary, MISSING_VALUE};

/// Per-channel aggregates before boundary rounding.
struct ChannelStats {
    avg: Option<f64>,
    monthly: [f64; 12],
    quality: f64,
    best: Option<f64>,
    worst: Option<f64>,
}

/// Aggregate one channel of dated samples.
fn summarize_channel(samples: &BTreeMap<NaiveDate, f64>) -> ChannelStats {
    let total = samples.len();

    let mut valid_sum = 0.0;
    let mut valid_count = 0usize;
    let mut monthly_sum = [0.0f64; 12];
    let mut monthly_count = [0usize; 12];

    for (date, &value) in samples {
        if value == MISSING_VALUE {
            continue;
        }
        valid_sum += value;
        valid_count += 1;
        let month_idx = date.month0() as usize;
        monthly_sum[month_idx] += value;
        monthly_count[month_idx] += 1;
    }

    let avg = if valid_count > 0 {
        Some(valid_sum / valid_count as f64)
    } else {
        None
    };

    // Guard against an empty series; quality is a fraction in [0, 1].
    let quality = if total > 0 {
        valid_count as f64 / total as f64
    } else {
        0.0
    };

    // Empty months report 0.0, a defined default that keeps the 12-entry
    // structure total. Best/worst consider non-empty months only, scanning
    // in month order so ties keep the first month encountered.
    let mut monthly = [0.0f64; 12];
    let mut best: Option<f64> = None;
    let mut worst: Option<f64> = None;
    for idx in 0..12 {
        if monthly_count[idx] == 0 {
            continue;
        }
        let mean = monthly_sum[idx] / monthly_count[idx] as f64;
        monthly[idx] = mean;
        if best.map_or(true, |b| mean > b) {
            best = Some(mean);
        }
        if worst.map_or(true, |w| mean < w) {
            worst = Some(mean);
        }
    }

    ChannelStats {
        avg,
        monthly,
        quality,
        best,
        worst,
    }
}

/// Reduce a raw two-channel series to an [`IrradianceSummary`].
///
/// `period` is the caller-supplied fetch window; the aggregator does not
/// assume any particular range length.
pub fn summarize_series(
    series: &IrradianceSeries,
    coords: Coordinates,
    period: (NaiveDate, NaiveDate),
) -> IrradianceSummary {
    let all_sky = summarize_channel(&series.all_sky);
    let clear_sky = summarize_channel(&series.clear_sky);

    IrradianceSummary {
        avg_all_sky: all_sky.avg.map(round2),
        avg_clear_sky: clear_sky.avg.map(round2),
        monthly_all_sky: all_sky.monthly.map(round2),
        monthly_clear_sky: clear_sky.monthly.map(round2),
        all_sky_quality: round4(all_sky.quality),
        clear_sky_quality: round4(clear_sky.quality),
        best_all_sky: all_sky.best.map(round2),
        worst_all_sky: all_sky.worst.map(round2),
        best_clear_sky: clear_sky.best.map(round2),
        worst_clear_sky: clear_sky.worst.map(round2),
        latitude: Some(coords.latitude),
        longitude: Some(coords.longitude),
        period_start: period.0,
        period_end: period.1,
    }
}
