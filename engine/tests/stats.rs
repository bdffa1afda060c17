use engine::anomaly::generate_seeded;
use engine::stats::{fit_spreading_rate, summarize};
use engine::SpreadingRate;

#[test]
fn fast_tables_fit_faster_than_slow() {
    let slow = generate_seeded(SpreadingRate::Slow, 400, 21).unwrap();
    let fast = generate_seeded(SpreadingRate::Fast, 400, 21).unwrap();
    let fs = fit_spreading_rate(&slow).unwrap();
    let ff = fit_spreading_rate(&fast).unwrap();
    // Expected rates are mean width / mean step: 10/0.55 and 20/0.55 km/Myr
    assert!(fs.slope_km_per_myr > 12.0 && fs.slope_km_per_myr < 26.0, "slow {}", fs.slope_km_per_myr);
    assert!(ff.slope_km_per_myr > 27.0 && ff.slope_km_per_myr < 50.0, "fast {}", ff.slope_km_per_myr);
    assert!(ff.half_rate_mm_per_yr() > fs.half_rate_mm_per_yr());
    assert!(fs.r_squared > 0.95 && ff.r_squared > 0.95);
}

#[test]
fn single_row_cannot_be_fit() {
    let t = generate_seeded(SpreadingRate::Slow, 1, 0).unwrap();
    assert!(fit_spreading_rate(&t).is_err());
}

#[test]
fn summary_matches_last_row() {
    let t = generate_seeded(SpreadingRate::Fast, 10, 8).unwrap();
    let s = summarize(&t);
    let last = t.records()[9];
    assert_eq!(s.rows, 10);
    assert_eq!(s.span_km, last.distance_from_ridge);
    assert_eq!(s.oldest_myr, last.age);
    assert!(s.mean_width_km >= 15.0 && s.mean_width_km <= 25.0);
    assert!(s.mean_age_step_myr >= 0.1 && s.mean_age_step_myr <= 1.0);
}
