use engine::anomaly::{self, AGE_STEP_MYR, MAX_ANOMALIES};
use engine::config::AnomalyParams;
use engine::{MagstripeError, Polarity, SpreadingRate};
use rand::rngs::StdRng;
use rand::SeedableRng;

const TOL: f64 = 1e-9;

fn assert_steps_within(steps: &[f64], lo: f64, hi: f64) {
    for (i, &d) in steps.iter().enumerate() {
        assert!(d >= lo - TOL && d <= hi + TOL, "step {} = {} outside [{}, {}]", i, d, lo, hi);
    }
}

#[test]
fn slow_four_rows_scenario() {
    let t = anomaly::generate(SpreadingRate::Slow, 4).unwrap();
    assert_eq!(t.len(), 4);
    assert_eq!(t.spreading_rate(), SpreadingRate::Slow);
    assert_eq!(t.polarities(), vec![1, -1, 1, -1]);

    let d = t.distances();
    let a = t.ages();
    for i in 1..4 {
        assert!(d[i - 1] < d[i]);
        assert!(a[i - 1] < a[i]);
    }
    assert_steps_within(&t.distance_steps(), 5.0, 15.0);
    assert_steps_within(&t.age_steps(), 0.1, 1.0);
}

#[test]
fn fast_single_row_scenario() {
    let t = anomaly::generate(SpreadingRate::Fast, 1).unwrap();
    assert_eq!(t.len(), 1);
    assert_eq!(t.polarities(), vec![1]);
    let d0 = t.records()[0].distance_from_ridge;
    assert!((15.0..=25.0).contains(&d0), "d0={}", d0);
    let a0 = t.records()[0].age;
    assert!((0.1..=1.0).contains(&a0), "a0={}", a0);
}

#[test]
fn non_positive_counts_rejected() {
    for n in [0i64, -1, -100] {
        let err = anomaly::generate(SpreadingRate::Slow, n).unwrap_err();
        assert!(matches!(err, MagstripeError::InvalidParameter { name: "num_anomalies", .. }));
    }
    assert!(anomaly::generate_seeded(SpreadingRate::Fast, 0, 7).is_err());
}

#[test]
fn oversized_counts_rejected_without_allocating() {
    for n in [MAX_ANOMALIES + 1, i64::MAX] {
        let err = anomaly::generate_seeded(SpreadingRate::Slow, n, 1).unwrap_err();
        assert!(matches!(err, MagstripeError::InvalidParameter { name: "num_anomalies", .. }));
    }
    assert_eq!(anomaly::validate_count(MAX_ANOMALIES).unwrap(), MAX_ANOMALIES as usize);
}

#[test]
fn unknown_rate_tag_rejected() {
    let err = "medium".parse::<SpreadingRate>().unwrap_err();
    assert!(err.to_string().contains("spreading_rate"));
    assert_eq!("fast".parse::<SpreadingRate>().unwrap(), SpreadingRate::Fast);
    assert_eq!(SpreadingRate::Slow.to_string(), "slow");
}

#[test]
fn invariants_hold_across_rates_and_lengths() {
    let mut rng = StdRng::seed_from_u64(0x5eaf_100d);
    for rate in SpreadingRate::ALL {
        let (lo, hi) = rate.width_range_km();
        for n in [1i64, 2, 3, 17, 100, 501] {
            let t = anomaly::generate_with_rng(rate, n, &mut rng).unwrap();
            assert_eq!(t.len(), n as usize);
            for (i, r) in t.iter().enumerate() {
                assert_eq!(r.polarity, Polarity::at_index(i));
                assert_eq!(r.polarity.sign() == 1, i % 2 == 0);
                assert!(r.distance_from_ridge > 0.0);
                assert!(r.age > 0.0);
            }
            for w in t.records().windows(2) {
                assert!(w[0].distance_from_ridge < w[1].distance_from_ridge);
                assert!(w[0].age < w[1].age);
            }
            assert_steps_within(&t.distance_steps(), lo, hi);
            assert_steps_within(&t.age_steps(), AGE_STEP_MYR.0, AGE_STEP_MYR.1);
        }
    }
}

#[test]
fn odd_length_ends_on_normal() {
    let t = anomaly::generate_seeded(SpreadingRate::Slow, 5, 3).unwrap();
    let normals = t.polarities().iter().filter(|&&s| s == 1).count();
    assert_eq!(normals, 3);
    assert_eq!(t.records()[4].polarity, Polarity::Normal);
}

#[test]
fn seeded_generation_is_reproducible() {
    let a = anomaly::generate_seeded(SpreadingRate::Fast, 50, 42).unwrap();
    let b = anomaly::generate_seeded(SpreadingRate::Fast, 50, 42).unwrap();
    let c = anomaly::generate_seeded(SpreadingRate::Fast, 50, 43).unwrap();
    assert_eq!(a, b);
    assert_ne!(a.distances(), c.distances());
}

#[test]
fn default_params_generate_one_hundred_slow_rows() {
    let p = AnomalyParams::default();
    assert_eq!(p.spreading_rate, SpreadingRate::Slow);
    let t = anomaly::generate_from_params(p).unwrap();
    assert_eq!(t.len(), 100);
    let last = t.records()[99];
    // 100 stripes of 5..15 km each
    assert!(last.distance_from_ridge >= 500.0 - TOL && last.distance_from_ridge <= 1500.0 + TOL);
}
