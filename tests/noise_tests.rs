// Host-side tests for the simplex noise field.

use musync::SimplexNoise;

fn grid() -> impl Iterator<Item = (f32, f32, f32)> {
    (0..24).flat_map(|a| {
        (0..24).flat_map(move |b| {
            (0..24).map(move |c| (a as f32 * 0.37 - 4.0, b as f32 * 0.29 - 3.0, c as f32 * 0.41 - 5.0))
        })
    })
}

#[test]
fn same_seed_same_field() {
    let a = SimplexNoise::new(7);
    let b = SimplexNoise::new(7);
    for (x, y, z) in grid().take(500) {
        assert_eq!(a.noise3d(x, y, z), b.noise3d(x, y, z));
    }
}

#[test]
fn different_seeds_differ_somewhere() {
    let a = SimplexNoise::new(1);
    let b = SimplexNoise::new(2);
    assert!(grid().take(500).any(|(x, y, z)| a.noise3d(x, y, z) != b.noise3d(x, y, z)));
}

#[test]
fn output_stays_within_unit_range() {
    let n = SimplexNoise::new(42);
    let mut lo = f32::MAX;
    let mut hi = f32::MIN;
    for (x, y, z) in grid() {
        let v = n.noise3d(x, y, z);
        assert!(v.is_finite());
        lo = lo.min(v);
        hi = hi.max(v);
    }
    assert!(lo >= -1.0 && hi <= 1.0, "range [{lo}, {hi}]");
    // Not a flat field.
    assert!(hi - lo > 0.5);
}

#[test]
fn adjacent_samples_are_close() {
    let n = SimplexNoise::new(3);
    let d = 1e-4;
    for (x, y, z) in grid().step_by(7) {
        let v = n.noise3d(x, y, z);
        assert!((n.noise3d(x + d, y, z) - v).abs() < 0.01);
        assert!((n.noise3d(x, y + d, z) - v).abs() < 0.01);
        assert!((n.noise3d(x, y, z + d) - v).abs() < 0.01);
    }
}

#[test]
fn negative_coordinates_are_fine() {
    let n = SimplexNoise::default();
    let v = n.noise3d(-1000.3, -2000.7, -3.1);
    assert!(v.is_finite() && v.abs() <= 1.0);
}
