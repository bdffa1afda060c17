//! Parameter sets for generation, mirroring and gridding.
//!
//! Plain `Copy` structs with defaults matching the classroom figures; the viewer
//! fills them from its command line.

use crate::anomaly::SpreadingRate;

/// Parameters for the anomaly generator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnomalyParams {
    /// Stripe-width class
    pub spreading_rate: SpreadingRate,
    /// Number of stripes; must be positive
    pub num_anomalies: i64,
}

impl Default for AnomalyParams {
    fn default() -> Self {
        Self { spreading_rate: SpreadingRate::Slow, num_anomalies: 100 }
    }
}

/// Along-ridge replication used for the mirrored map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MirrorParams {
    /// First along-ridge position (km)
    pub along_start_km: f64,
    /// Last along-ridge position (km), inclusive
    pub along_end_km: f64,
    /// Number of along-ridge positions (>= 1)
    pub offsets: usize,
}

impl Default for MirrorParams {
    fn default() -> Self {
        Self { along_start_km: 0.0, along_end_km: 100.0, offsets: 20 }
    }
}

/// Resolution of the regular grid behind the contour map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridParams {
    /// Nodes across the ridge
    pub nx: usize,
    /// Nodes along the ridge
    pub ny: usize,
}

impl Default for GridParams {
    fn default() -> Self {
        Self { nx: 200, ny: 50 }
    }
}

/// Everything needed to go from a seed to a drawable map.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct MagstripeConfig {
    /// Generator settings
    pub anomaly: AnomalyParams,
    /// Mirror settings
    pub mirror: MirrorParams,
    /// Grid settings
    pub grid: GridParams,
    /// Optional deterministic seed; `None` draws from entropy
    pub seed: Option<u64>,
}
