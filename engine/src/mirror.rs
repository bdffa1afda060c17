//! Mirrored map expansion: replicate one ridge flank along the ridge and
//! reflect it across the axis.
//!
//! The output is the outer product anomaly × along-ridge offset (anomaly-major),
//! followed by the same block with `distance_from_ridge` negated.

use crate::anomaly::{AnomalyTable, Polarity};
use crate::config::MirrorParams;
use crate::error::{MagstripeError, Result};

/// One sample of the two-flank map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MirroredPoint {
    /// Signed distance from the ridge axis (km); negative on the mirrored flank
    pub distance_from_ridge: f64,
    /// Position along the ridge (km)
    pub along_ridge: f64,
    /// Crustal age (Myr)
    pub age: f64,
    /// Recorded polarity
    pub polarity: Polarity,
}

/// Evenly spaced along-ridge offsets from `start` to `end` inclusive.
///
/// `count == 1` yields `[start]`.
pub fn along_ridge_offsets(start: f64, end: f64, count: usize) -> Result<Vec<f64>> {
    if count == 0 {
        return Err(MagstripeError::invalid("offsets", "need at least one along-ridge offset"));
    }
    if !start.is_finite() || !end.is_finite() {
        return Err(MagstripeError::invalid("offsets", "along-ridge range must be finite"));
    }
    if count == 1 {
        return Ok(vec![start]);
    }
    let step = (end - start) / (count - 1) as f64;
    let mut out: Vec<f64> = (0..count).map(|i| start + step * i as f64).collect();
    // Pin the last node exactly to `end`
    if let Some(last) = out.last_mut() {
        *last = end;
    }
    Ok(out)
}

/// Offsets described by [`MirrorParams`].
pub fn offsets_from_params(p: MirrorParams) -> Result<Vec<f64>> {
    along_ridge_offsets(p.along_start_km, p.along_end_km, p.offsets)
}

/// Expand `table` across `offsets` and append the mirrored flank.
///
/// Returns `2 * table.len() * offsets.len()` points. Point `k` of the second
/// half mirrors point `k` of the first half.
pub fn expand_mirrored(table: &AnomalyTable, offsets: &[f64]) -> Result<Vec<MirroredPoint>> {
    if offsets.is_empty() {
        return Err(MagstripeError::invalid("offsets", "need at least one along-ridge offset"));
    }
    if offsets.iter().any(|o| !o.is_finite()) {
        return Err(MagstripeError::invalid("offsets", "along-ridge offsets must be finite"));
    }

    let half = table.len() * offsets.len();
    let mut points = Vec::with_capacity(2 * half);
    for rec in table {
        for &y in offsets {
            points.push(MirroredPoint {
                distance_from_ridge: rec.distance_from_ridge,
                along_ridge: y,
                age: rec.age,
                polarity: rec.polarity,
            });
        }
    }
    for k in 0..half {
        let p = points[k];
        points.push(MirroredPoint { distance_from_ridge: -p.distance_from_ridge, ..p });
    }

    tracing::debug!(
        "[mirror] anomalies={} offsets={} points={}",
        table.len(),
        offsets.len(),
        points.len()
    );
    Ok(points)
}
