//! Synthetic magnetic anomalies on one flank of a spreading ridge.
//!
//! Each anomaly is a stripe of seafloor that recorded one polarity era. Stripe
//! widths are drawn from a range picked by the spreading-rate class, stripe
//! durations from a fixed range; running sums give distance from the ridge axis
//! and crustal age. Polarity alternates normal/reversed starting at the ridge.

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::AnomalyParams;
use crate::error::{MagstripeError, Result};

/// Age increment range per anomaly (Myr).
pub const AGE_STEP_MYR: (f64, f64) = (0.1, 1.0);

/// Largest accepted anomaly count.
pub const MAX_ANOMALIES: i64 = 1_000_000;

/// Spreading-rate class controlling stripe widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SpreadingRate {
    /// Narrow stripes, 5–15 km each
    #[default]
    Slow,
    /// Wide stripes, 15–25 km each
    Fast,
}

impl SpreadingRate {
    /// Both classes, slow first.
    pub const ALL: [SpreadingRate; 2] = [SpreadingRate::Slow, SpreadingRate::Fast];

    /// Inclusive stripe-width range in km.
    #[inline]
    pub fn width_range_km(self) -> (f64, f64) {
        match self {
            SpreadingRate::Slow => (5.0, 15.0),
            SpreadingRate::Fast => (15.0, 25.0),
        }
    }

    /// Lower-case tag, as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            SpreadingRate::Slow => "slow",
            SpreadingRate::Fast => "fast",
        }
    }
}

impl fmt::Display for SpreadingRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpreadingRate {
    type Err = MagstripeError;

    fn from_str(s: &str) -> Result<Self> {
        let tag = s.trim();
        if tag.eq_ignore_ascii_case("slow") {
            Ok(SpreadingRate::Slow)
        } else if tag.eq_ignore_ascii_case("fast") {
            Ok(SpreadingRate::Fast)
        } else {
            Err(MagstripeError::invalid(
                "spreading_rate",
                format!("expected \"slow\" or \"fast\", got {s:?}"),
            ))
        }
    }
}

/// Recorded field orientation of one stripe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    /// Same orientation as the present-day field (+1)
    Normal,
    /// Opposite orientation (-1)
    Reversed,
}

impl Polarity {
    /// Polarity of the stripe at position `index` counted from the ridge.
    #[inline]
    pub fn at_index(index: usize) -> Self {
        if index % 2 == 0 {
            Polarity::Normal
        } else {
            Polarity::Reversed
        }
    }

    /// +1 for normal, -1 for reversed.
    #[inline]
    pub fn sign(self) -> i8 {
        match self {
            Polarity::Normal => 1,
            Polarity::Reversed => -1,
        }
    }

    /// The opposite polarity.
    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Polarity::Normal => Polarity::Reversed,
            Polarity::Reversed => Polarity::Normal,
        }
    }
}

/// One magnetic anomaly (stripe) on the ridge flank.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnomalyRecord {
    /// Distance of the stripe's outer edge from the ridge axis (km)
    pub distance_from_ridge: f64,
    /// Recorded polarity
    pub polarity: Polarity,
    /// Crustal age at the stripe's outer edge (Myr)
    pub age: f64,
}

/// Immutable table of anomalies ordered outward from the ridge.
#[derive(Debug, Clone, PartialEq)]
pub struct AnomalyTable {
    rate: SpreadingRate,
    records: Vec<AnomalyRecord>,
}

impl AnomalyTable {
    /// Spreading-rate class the table was generated with.
    pub fn spreading_rate(&self) -> SpreadingRate {
        self.rate
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the table has no rows (never the case for generated tables).
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All rows, ridge outward.
    pub fn records(&self) -> &[AnomalyRecord] {
        &self.records
    }

    /// Iterate over rows.
    pub fn iter(&self) -> std::slice::Iter<'_, AnomalyRecord> {
        self.records.iter()
    }

    /// `distance_from_ridge` column (km).
    pub fn distances(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.distance_from_ridge).collect()
    }

    /// `polarity` column as signs.
    pub fn polarities(&self) -> Vec<i8> {
        self.records.iter().map(|r| r.polarity.sign()).collect()
    }

    /// `age` column (Myr).
    pub fn ages(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.age).collect()
    }

    /// Stripe widths (km); the first is measured from the ridge axis.
    pub fn distance_steps(&self) -> Vec<f64> {
        steps(self.records.iter().map(|r| r.distance_from_ridge))
    }

    /// Stripe durations (Myr); the first is measured from zero age.
    pub fn age_steps(&self) -> Vec<f64> {
        steps(self.records.iter().map(|r| r.age))
    }
}

impl<'a> IntoIterator for &'a AnomalyTable {
    type Item = &'a AnomalyRecord;
    type IntoIter = std::slice::Iter<'a, AnomalyRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

fn steps(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut prev = 0.0;
    values
        .map(|v| {
            let d = v - prev;
            prev = v;
            d
        })
        .collect()
}

/// Validate a caller-supplied anomaly count.
pub fn validate_count(num_anomalies: i64) -> Result<usize> {
    if num_anomalies <= 0 {
        return Err(MagstripeError::invalid(
            "num_anomalies",
            format!("must be a positive integer, got {num_anomalies}"),
        ));
    }
    if num_anomalies > MAX_ANOMALIES {
        return Err(MagstripeError::invalid(
            "num_anomalies",
            format!("at most {MAX_ANOMALIES} anomalies, got {num_anomalies}"),
        ));
    }
    usize::try_from(num_anomalies)
        .map_err(|_| MagstripeError::invalid("num_anomalies", "does not fit in usize"))
}

/// Generate a fresh table from the thread-local entropy source.
pub fn generate(rate: SpreadingRate, num_anomalies: i64) -> Result<AnomalyTable> {
    generate_with_rng(rate, num_anomalies, &mut rand::thread_rng())
}

/// Generate a reproducible table from a `u64` seed.
pub fn generate_seeded(rate: SpreadingRate, num_anomalies: i64, seed: u64) -> Result<AnomalyTable> {
    let mut rng = StdRng::seed_from_u64(seed);
    generate_with_rng(rate, num_anomalies, &mut rng)
}

/// Generate from [`AnomalyParams`]; unseeded.
pub fn generate_from_params(params: AnomalyParams) -> Result<AnomalyTable> {
    generate(params.spreading_rate, params.num_anomalies)
}

/// Generate a table drawing every sample from `rng`.
///
/// All `n` widths are drawn before the `n` age steps.
pub fn generate_with_rng<R: Rng>(
    rate: SpreadingRate,
    num_anomalies: i64,
    rng: &mut R,
) -> Result<AnomalyTable> {
    let n = validate_count(num_anomalies)?;
    let (w_lo, w_hi) = rate.width_range_km();
    let (a_lo, a_hi) = AGE_STEP_MYR;

    let widths: Vec<f64> = (0..n).map(|_| rng.gen_range(w_lo..=w_hi)).collect();
    let age_steps: Vec<f64> = (0..n).map(|_| rng.gen_range(a_lo..=a_hi)).collect();

    let mut records = Vec::with_capacity(n);
    let mut distance = 0.0f64;
    let mut age = 0.0f64;
    for (i, (w, dt)) in widths.iter().zip(age_steps.iter()).enumerate() {
        distance += w;
        age += dt;
        records.push(AnomalyRecord {
            distance_from_ridge: distance,
            polarity: Polarity::at_index(i),
            age,
        });
    }

    tracing::debug!(
        "[anomaly] rate={} n={} span={:.1} km oldest={:.2} Myr",
        rate,
        n,
        distance,
        age
    );
    Ok(AnomalyTable { rate, records })
}
