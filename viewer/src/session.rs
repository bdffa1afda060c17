//! Datasets behind the viewer panels, rebuilt whenever a control changes.

use engine::anomaly::{self, SpreadingRate};
use engine::config::MagstripeConfig;
use engine::griddata::{self, GridField, MapField};
use engine::mirror::{self, MirroredPoint};
use engine::stats::{self, RateFit, TableSummary};
use engine::{AnomalyTable, Result};

/// One generated flank with its derived numbers.
pub struct Dataset {
    /// Generated anomalies
    pub table: AnomalyTable,
    /// Distance-on-age fit; `None` when the table is too short to fit
    pub fit: Option<RateFit>,
    /// Headline numbers shown in the side panel
    pub summary: TableSummary,
}

impl Dataset {
    fn new(table: AnomalyTable) -> Self {
        let fit = stats::fit_spreading_rate(&table).ok();
        let summary = stats::summarize(&table);
        Self { table, fit, summary }
    }
}

/// Mirrored map of the active dataset.
pub struct MapData {
    /// Both flanks replicated along the ridge
    pub points: Vec<MirroredPoint>,
    /// `points` interpolated onto the display grid
    pub grid: GridField,
    /// Quantity held in `grid`
    pub field: MapField,
}

/// Everything the viewer draws.
pub struct Session {
    /// Settings the datasets were built from
    pub config: MagstripeConfig,
    /// Requested map quantity
    pub map_field: MapField,
    /// Slow-rate flank
    pub slow: Dataset,
    /// Fast-rate flank
    pub fast: Dataset,
    /// Map of the flank selected by `config.anomaly.spreading_rate`
    pub map: MapData,
}

#[inline]
fn rate_seed(seed: u64, rate: SpreadingRate) -> u64 {
    match rate {
        SpreadingRate::Slow => seed,
        SpreadingRate::Fast => seed ^ 0x0066_6173_7400, // "fast"
    }
}

fn build_dataset(config: &MagstripeConfig, rate: SpreadingRate) -> Result<Dataset> {
    let n = config.anomaly.num_anomalies;
    let table = match config.seed {
        Some(seed) => anomaly::generate_seeded(rate, n, rate_seed(seed, rate))?,
        None => anomaly::generate(rate, n)?,
    };
    Ok(Dataset::new(table))
}

fn build_map(config: &MagstripeConfig, table: &AnomalyTable, field: MapField) -> Result<MapData> {
    let offsets = mirror::offsets_from_params(config.mirror)?;
    let points = mirror::expand_mirrored(table, &offsets)?;
    let grid = griddata::grid_mirrored(&points, field, config.grid.nx, config.grid.ny)?;
    Ok(MapData { points, grid, field })
}

impl Session {
    /// Generate both rate classes and the map for the configured one.
    pub fn new(config: MagstripeConfig, map_field: MapField) -> Result<Self> {
        let slow = build_dataset(&config, SpreadingRate::Slow)?;
        let fast = build_dataset(&config, SpreadingRate::Fast)?;
        let active = match config.anomaly.spreading_rate {
            SpreadingRate::Slow => &slow.table,
            SpreadingRate::Fast => &fast.table,
        };
        let map = build_map(&config, active, map_field)?;
        let session = Self { config, map_field, slow, fast, map };
        session.log_fits();
        Ok(session)
    }

    /// Dataset for the configured spreading-rate class.
    pub fn active(&self) -> &Dataset {
        self.dataset(self.config.anomaly.spreading_rate)
    }

    /// Dataset for `rate`.
    pub fn dataset(&self, rate: SpreadingRate) -> &Dataset {
        match rate {
            SpreadingRate::Slow => &self.slow,
            SpreadingRate::Fast => &self.fast,
        }
    }

    /// Draw fresh tables; a seeded session advances its seed so results change.
    pub fn reseed(&mut self) -> Result<()> {
        if let Some(s) = self.config.seed.as_mut() {
            *s = s.wrapping_add(1);
        }
        *self = Self::new(self.config, self.map_field)?;
        Ok(())
    }

    /// Apply a new configuration and map field, regenerating everything.
    pub fn reconfigure(&mut self, config: MagstripeConfig, map_field: MapField) -> Result<()> {
        *self = Self::new(config, map_field)?;
        Ok(())
    }

    /// Re-grid the map only (data unchanged).
    pub fn set_map_field(&mut self, field: MapField) -> Result<()> {
        if field == self.map.field {
            return Ok(());
        }
        let grid =
            griddata::grid_mirrored(&self.map.points, field, self.config.grid.nx, self.config.grid.ny)?;
        self.map.grid = grid;
        self.map.field = field;
        self.map_field = field;
        Ok(())
    }

    fn log_fits(&self) {
        for rate in SpreadingRate::ALL {
            let ds = self.dataset(rate);
            match ds.fit {
                Some(fit) => tracing::info!(
                    "[fit] {} n={} half-rate≈{:.1} mm/yr (r²={:.3}) span={:.0} km oldest={:.1} Myr",
                    rate,
                    ds.summary.rows,
                    fit.half_rate_mm_per_yr(),
                    fit.r_squared,
                    ds.summary.span_km,
                    ds.summary.oldest_myr
                ),
                None => tracing::info!("[fit] {} n={} (too few rows to fit)", rate, ds.summary.rows),
            }
        }
    }
}
