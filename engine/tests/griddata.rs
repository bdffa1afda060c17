use engine::anomaly::generate_seeded;
use engine::griddata::{grid_mirrored, grid_nearest, GridSpec, MapField};
use engine::mirror::{along_ridge_offsets, expand_mirrored};
use engine::SpreadingRate;

#[test]
fn nodes_on_samples_take_sample_values() {
    let xs = [0.0, 10.0, 0.0, 10.0];
    let ys = [0.0, 0.0, 10.0, 10.0];
    let vs = [1.0, 2.0, 3.0, 4.0];
    let spec = GridSpec { nx: 2, ny: 2, x_range: (0.0, 10.0), y_range: (0.0, 10.0) };
    let g = grid_nearest(&xs, &ys, &vs, spec).unwrap();
    assert_eq!(g.values, vec![1.0, 2.0, 3.0, 4.0]);
    assert_eq!(g.value(1, 1), 4.0);
    assert_eq!(g.x_at(1), 10.0);
    assert_eq!(g.y_at(0), 0.0);
    assert_eq!(g.min_max(), (1.0, 4.0));
}

#[test]
fn nearest_sample_wins_and_ties_go_to_first() {
    let xs = [0.0, 10.0];
    let ys = [0.0, 0.0];
    let vs = [-1.0, 1.0];
    let spec = GridSpec { nx: 5, ny: 1, x_range: (0.0, 10.0), y_range: (0.0, 0.0) };
    let g = grid_nearest(&xs, &ys, &vs, spec).unwrap();
    // nodes at 0, 2.5, 5, 7.5, 10; node 5 is equidistant
    assert_eq!(g.values, vec![-1.0, -1.0, -1.0, 1.0, 1.0]);
}

#[test]
fn invalid_inputs_rejected() {
    let spec = GridSpec { nx: 2, ny: 2, x_range: (0.0, 1.0), y_range: (0.0, 1.0) };
    assert!(grid_nearest(&[], &[], &[], spec).is_err());
    assert!(grid_nearest(&[0.0], &[0.0, 1.0], &[0.0], spec).is_err());
    let bad = GridSpec { nx: 0, ..spec };
    assert!(grid_nearest(&[0.0], &[0.0], &[1.0], bad).is_err());
    let flat = GridSpec { x_range: (1.0, 1.0), ..spec };
    assert!(grid_nearest(&[0.0], &[0.0], &[1.0], flat).is_err());

    // Zero node counts are rejected even on an axis that would collapse
    let t = generate_seeded(SpreadingRate::Slow, 4, 6).unwrap();
    let pts = expand_mirrored(&t, &[0.0]).unwrap();
    assert!(grid_mirrored(&pts, MapField::Polarity, 30, 0).is_err());
    assert!(grid_mirrored(&pts, MapField::Polarity, 0, 5).is_err());
    assert!(grid_mirrored(&pts, MapField::Polarity, 30, 5).is_ok());
}

#[test]
fn mirrored_polarity_map_is_symmetric_about_ridge() {
    let t = generate_seeded(SpreadingRate::Slow, 12, 99).unwrap();
    let offsets = along_ridge_offsets(0.0, 50.0, 6).unwrap();
    let pts = expand_mirrored(&t, &offsets).unwrap();
    let g = grid_mirrored(&pts, MapField::Polarity, 41, 6).unwrap();
    assert_eq!(g.spec.nx, 41);
    assert_eq!(g.spec.ny, 6);
    let span = t.records()[11].distance_from_ridge;
    assert!((g.spec.x_range.0 + span).abs() < 1e-12);
    assert!((g.spec.x_range.1 - span).abs() < 1e-12);
    for v in &g.values {
        assert!(*v == 1.0 || *v == -1.0);
    }
    // Outermost columns hold the outermost stripe on both flanks
    let outer = f64::from(t.records()[11].polarity.sign());
    for iy in 0..g.spec.ny {
        assert_eq!(g.value(0, iy), outer);
        assert_eq!(g.value(40, iy), outer);
    }
}

#[test]
fn age_map_bounded_by_table_ages() {
    let t = generate_seeded(SpreadingRate::Fast, 8, 4).unwrap();
    let pts = expand_mirrored(&t, &[0.0]).unwrap();
    let g = grid_mirrored(&pts, MapField::Age, 30, 10).unwrap();
    // single offset collapses the along-ridge axis
    assert_eq!(g.spec.ny, 1);
    let (lo, hi) = g.min_max();
    let ages = t.ages();
    assert!(lo >= ages[0] && hi <= ages[7]);
}
