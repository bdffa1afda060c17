//! Nearest-neighbor interpolation of scattered samples onto a regular grid.
//!
//! Brute force over all samples per node; map sizes here are a few thousand
//! samples on a few thousand nodes.

use crate::error::{MagstripeError, Result};
use crate::mirror::MirroredPoint;

/// Regular grid layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    /// Nodes along x (>= 1)
    pub nx: usize,
    /// Nodes along y (>= 1)
    pub ny: usize,
    /// Inclusive x extent `(min, max)`
    pub x_range: (f64, f64),
    /// Inclusive y extent `(min, max)`
    pub y_range: (f64, f64),
}

impl GridSpec {
    fn validate(&self) -> Result<()> {
        if self.nx == 0 || self.ny == 0 {
            return Err(MagstripeError::invalid("grid", "nx and ny must be at least 1"));
        }
        check_axis("x_range", self.x_range, self.nx)?;
        check_axis("y_range", self.y_range, self.ny)
    }
}

fn check_axis(name: &'static str, (lo, hi): (f64, f64), n: usize) -> Result<()> {
    if !lo.is_finite() || !hi.is_finite() {
        return Err(MagstripeError::invalid(name, "bounds must be finite"));
    }
    if hi < lo || (hi == lo && n > 1) {
        return Err(MagstripeError::invalid(name, format!("empty range [{lo}, {hi}] for {n} nodes")));
    }
    Ok(())
}

#[inline]
fn node(lo: f64, hi: f64, n: usize, i: usize) -> f64 {
    if n <= 1 {
        lo
    } else {
        lo + (hi - lo) * (i as f64) / ((n - 1) as f64)
    }
}

/// Values on a regular grid, row-major with y as the slow axis.
#[derive(Debug, Clone, PartialEq)]
pub struct GridField {
    /// Layout the values were computed on
    pub spec: GridSpec,
    /// `nx * ny` values
    pub values: Vec<f64>,
}

impl GridField {
    /// Value at node `(ix, iy)`.
    #[inline]
    pub fn value(&self, ix: usize, iy: usize) -> f64 {
        self.values[iy * self.spec.nx + ix]
    }

    /// x coordinate of column `ix`.
    #[inline]
    pub fn x_at(&self, ix: usize) -> f64 {
        node(self.spec.x_range.0, self.spec.x_range.1, self.spec.nx, ix)
    }

    /// y coordinate of row `iy`.
    #[inline]
    pub fn y_at(&self, iy: usize) -> f64 {
        node(self.spec.y_range.0, self.spec.y_range.1, self.spec.ny, iy)
    }

    /// Min/max over all nodes.
    pub fn min_max(&self) -> (f64, f64) {
        self.values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
    }
}

/// Interpolate `(xs[i], ys[i]) -> values[i]` onto `spec` by nearest neighbor.
///
/// Ties go to the lowest sample index.
pub fn grid_nearest(xs: &[f64], ys: &[f64], values: &[f64], spec: GridSpec) -> Result<GridField> {
    if xs.len() != ys.len() || xs.len() != values.len() {
        return Err(MagstripeError::invalid(
            "samples",
            format!("length mismatch x={} y={} v={}", xs.len(), ys.len(), values.len()),
        ));
    }
    if xs.is_empty() {
        return Err(MagstripeError::invalid("samples", "need at least one sample"));
    }
    spec.validate()?;

    let mut out = Vec::with_capacity(spec.nx * spec.ny);
    for iy in 0..spec.ny {
        let gy = node(spec.y_range.0, spec.y_range.1, spec.ny, iy);
        for ix in 0..spec.nx {
            let gx = node(spec.x_range.0, spec.x_range.1, spec.nx, ix);
            let mut best = 0usize;
            let mut best_d2 = f64::INFINITY;
            for (k, (&x, &y)) in xs.iter().zip(ys.iter()).enumerate() {
                let dx = x - gx;
                let dy = y - gy;
                let d2 = dx * dx + dy * dy;
                if d2 < best_d2 {
                    best_d2 = d2;
                    best = k;
                }
            }
            out.push(values[best]);
        }
    }
    Ok(GridField { spec, values: out })
}

/// Which quantity the map shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapField {
    /// Polarity sign (+1 / -1)
    #[default]
    Polarity,
    /// Crustal age (Myr)
    Age,
}

impl MapField {
    /// Extract the mapped quantity from one point.
    #[inline]
    pub fn sample(self, p: &MirroredPoint) -> f64 {
        match self {
            MapField::Polarity => f64::from(p.polarity.sign()),
            MapField::Age => p.age,
        }
    }
}

/// Grid the mirrored map over the points' own extent.
pub fn grid_mirrored(
    points: &[MirroredPoint],
    field: MapField,
    nx: usize,
    ny: usize,
) -> Result<GridField> {
    if nx == 0 || ny == 0 {
        return Err(MagstripeError::invalid("grid", "nx and ny must be at least 1"));
    }
    if points.is_empty() {
        return Err(MagstripeError::invalid("samples", "need at least one sample"));
    }
    let mut xs = Vec::with_capacity(points.len());
    let mut ys = Vec::with_capacity(points.len());
    let mut vs = Vec::with_capacity(points.len());
    let (mut x_lo, mut x_hi) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut y_lo, mut y_hi) = (f64::INFINITY, f64::NEG_INFINITY);
    for p in points {
        xs.push(p.distance_from_ridge);
        ys.push(p.along_ridge);
        vs.push(field.sample(p));
        x_lo = x_lo.min(p.distance_from_ridge);
        x_hi = x_hi.max(p.distance_from_ridge);
        y_lo = y_lo.min(p.along_ridge);
        y_hi = y_hi.max(p.along_ridge);
    }
    // Collapse an axis with no spread to a single node
    let nx = if x_hi > x_lo { nx } else { 1 };
    let ny = if y_hi > y_lo { ny } else { 1 };
    let spec = GridSpec { nx, ny, x_range: (x_lo, x_hi), y_range: (y_lo, y_hi) };
    let grid = grid_nearest(&xs, &ys, &vs, spec)?;
    tracing::debug!(
        "[grid] field={:?} nodes={}x{} x=[{:.1},{:.1}] y=[{:.1},{:.1}]",
        field,
        grid.spec.nx,
        grid.spec.ny,
        x_lo,
        x_hi,
        y_lo,
        y_hi
    );
    Ok(grid)
}
