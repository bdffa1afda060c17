use engine::anomaly::generate_seeded;
use engine::config::MirrorParams;
use engine::mirror::{along_ridge_offsets, expand_mirrored, offsets_from_params};
use engine::{MagstripeError, SpreadingRate};

#[test]
fn offsets_are_inclusive_and_even() {
    let o = along_ridge_offsets(0.0, 100.0, 5).unwrap();
    assert_eq!(o, vec![0.0, 25.0, 50.0, 75.0, 100.0]);
    assert_eq!(along_ridge_offsets(3.0, 9.0, 1).unwrap(), vec![3.0]);
    assert!(along_ridge_offsets(0.0, 1.0, 0).is_err());
    assert!(along_ridge_offsets(0.0, f64::NAN, 3).is_err());

    let d = offsets_from_params(MirrorParams::default()).unwrap();
    assert_eq!(d.len(), 20);
    assert_eq!(d[0], 0.0);
    assert_eq!(d[19], 100.0);
}

#[test]
fn expansion_size_and_mirror_correspondence() {
    let t = generate_seeded(SpreadingRate::Slow, 7, 11).unwrap();
    let offsets = along_ridge_offsets(0.0, 40.0, 3).unwrap();
    let pts = expand_mirrored(&t, &offsets).unwrap();
    let (n, m) = (t.len(), offsets.len());
    assert_eq!(pts.len(), 2 * n * m);

    let half = n * m;
    for (k, p) in pts[half..].iter().enumerate() {
        let q = pts[k];
        assert_eq!(p.age, q.age);
        assert_eq!(p.along_ridge, q.along_ridge);
        assert_eq!(p.polarity, q.polarity);
        assert_eq!(p.distance_from_ridge, -q.distance_from_ridge);
        assert!(p.distance_from_ridge < 0.0);
    }
}

#[test]
fn expansion_is_anomaly_major() {
    let t = generate_seeded(SpreadingRate::Fast, 2, 5).unwrap();
    let offsets = [10.0, 20.0, 30.0];
    let pts = expand_mirrored(&t, &offsets).unwrap();
    for (i, rec) in t.iter().enumerate() {
        for (j, &y) in offsets.iter().enumerate() {
            let p = pts[i * offsets.len() + j];
            assert_eq!(p.distance_from_ridge, rec.distance_from_ridge);
            assert_eq!(p.along_ridge, y);
            assert_eq!(p.age, rec.age);
        }
    }
}

#[test]
fn empty_offsets_rejected() {
    let t = generate_seeded(SpreadingRate::Slow, 3, 1).unwrap();
    let err = expand_mirrored(&t, &[]).unwrap_err();
    assert!(matches!(err, MagstripeError::InvalidParameter { name: "offsets", .. }));
    assert!(expand_mirrored(&t, &[0.0, f64::INFINITY]).is_err());
}
