//! Magstripe engine: synthetic seafloor magnetic anomalies and the map
//! transforms used to draw them.
#![deny(missing_docs)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::dbg_macro, clippy::large_enum_variant)]

pub mod anomaly;
pub mod config;
pub mod error;
pub mod griddata;
pub mod mirror;
pub mod stats;

pub use anomaly::{AnomalyRecord, AnomalyTable, Polarity, SpreadingRate};
pub use error::{MagstripeError, Result};

/// Returns the engine version string from Cargo metadata.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_semver_like() {
        assert!(version().split('.').count() >= 3);
    }
}
