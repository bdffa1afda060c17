//! Command-line options for the viewer binary.
use std::ops::RangeInclusive;
use std::path::PathBuf;

use clap::Parser;
use engine::config::{AnomalyParams, GridParams, MagstripeConfig, MirrorParams};
use engine::griddata::MapField;
use engine::SpreadingRate;

/// Synthetic seafloor magnetic anomalies: scatter and mirrored map viewer.
#[derive(Parser, Debug, Clone)]
#[command(name = "magstripe-viewer", version, about)]
pub struct ViewerArgs {
    /// Spreading-rate class of the mapped flank (slow | fast)
    #[arg(long, default_value = "slow", value_parser = parse_rate)]
    pub rate: SpreadingRate,

    /// Number of anomalies per flank
    #[arg(long, default_value_t = 100, allow_negative_numbers = true)]
    pub count: i64,

    /// Deterministic seed; omit for fresh random draws
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of along-ridge positions in the map
    #[arg(long, default_value_t = 20)]
    pub offsets: usize,

    /// Along-ridge extent of the map (km)
    #[arg(long, default_value_t = 100.0)]
    pub along_ridge_km: f64,

    /// Grid nodes across and along the ridge
    #[arg(long, num_args = 2, value_names = ["NX", "NY"], default_values_t = [200usize, 50])]
    pub grid: Vec<usize>,

    /// Map the crustal age instead of polarity
    #[arg(long)]
    pub age_map: bool,

    /// Write CSV files into this directory and exit without opening a window
    #[arg(long)]
    pub export: Option<PathBuf>,
}

fn parse_rate(s: &str) -> Result<SpreadingRate, String> {
    s.parse::<SpreadingRate>().map_err(|e| e.to_string())
}

impl ViewerArgs {
    pub fn config(&self) -> MagstripeConfig {
        let defaults = GridParams::default();
        MagstripeConfig {
            anomaly: AnomalyParams { spreading_rate: self.rate, num_anomalies: self.count },
            mirror: MirrorParams {
                along_start_km: 0.0,
                along_end_km: self.along_ridge_km,
                offsets: self.offsets,
            },
            grid: GridParams {
                nx: self.grid.first().copied().unwrap_or(defaults.nx),
                ny: self.grid.get(1).copied().unwrap_or(defaults.ny),
            },
            seed: self.seed,
        }
    }

    pub fn map_field(&self) -> MapField {
        if self.age_map {
            MapField::Age
        } else {
            MapField::Polarity
        }
    }
}

/// Slider ceiling unless the command line asked for more.
pub const SLIDER_MAX_COUNT: i64 = 500;

/// Anomaly-count slider range, widened to keep `current` reachable.
pub fn count_slider_range(current: i64) -> RangeInclusive<i64> {
    1..=current.max(SLIDER_MAX_COUNT)
}
