//! Spreading-rate fit and table summaries.

use crate::anomaly::AnomalyTable;
use crate::error::{MagstripeError, Result};

/// Least-squares line `distance = slope * age + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateFit {
    /// Half-spreading rate (km/Myr)
    pub slope_km_per_myr: f64,
    /// Distance at zero age (km)
    pub intercept_km: f64,
    /// Coefficient of determination
    pub r_squared: f64,
}

impl RateFit {
    /// Half-spreading rate in mm/yr (numerically equal to km/Myr).
    #[inline]
    pub fn half_rate_mm_per_yr(&self) -> f64 {
        self.slope_km_per_myr
    }

    /// Fitted distance at `age_myr`.
    #[inline]
    pub fn predict_km(&self, age_myr: f64) -> f64 {
        self.intercept_km + self.slope_km_per_myr * age_myr
    }
}

/// Fit distance against age by ordinary least squares.
pub fn fit_spreading_rate(table: &AnomalyTable) -> Result<RateFit> {
    fit_line(&table.ages(), &table.distances())
}

/// Ordinary least squares of `y` on `x`.
pub fn fit_line(x: &[f64], y: &[f64]) -> Result<RateFit> {
    if x.len() != y.len() {
        return Err(MagstripeError::invalid("samples", "x and y lengths differ"));
    }
    let n = x.len();
    if n < 2 {
        return Err(MagstripeError::invalid("samples", "need at least two rows to fit a rate"));
    }
    let nf = n as f64;
    let mx = x.iter().sum::<f64>() / nf;
    let my = y.iter().sum::<f64>() / nf;
    let mut sxx = 0.0;
    let mut sxy = 0.0;
    let mut syy = 0.0;
    for (&a, &b) in x.iter().zip(y.iter()) {
        let dx = a - mx;
        let dy = b - my;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    }
    if sxx <= 0.0 {
        return Err(MagstripeError::invalid("samples", "ages have zero variance"));
    }
    let slope = sxy / sxx;
    let intercept = my - slope * mx;
    let r_squared = if syy > 0.0 { (sxy * sxy) / (sxx * syy) } else { 1.0 };
    Ok(RateFit { slope_km_per_myr: slope, intercept_km: intercept, r_squared })
}

/// Headline numbers for one table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableSummary {
    /// Row count
    pub rows: usize,
    /// Distance of the outermost stripe (km)
    pub span_km: f64,
    /// Age of the outermost stripe (Myr)
    pub oldest_myr: f64,
    /// Mean stripe width (km)
    pub mean_width_km: f64,
    /// Mean stripe duration (Myr)
    pub mean_age_step_myr: f64,
}

/// Summarize a table. Empty tables summarize to zeros.
pub fn summarize(table: &AnomalyTable) -> TableSummary {
    let rows = table.len();
    let last = table.records().last();
    let span_km = last.map_or(0.0, |r| r.distance_from_ridge);
    let oldest_myr = last.map_or(0.0, |r| r.age);
    let denom = rows.max(1) as f64;
    TableSummary {
        rows,
        span_km,
        oldest_myr,
        mean_width_km: span_km / denom,
        mean_age_step_myr: oldest_myr / denom,
    }
}
