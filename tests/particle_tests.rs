// Host-side tests for the orbiting particle shell.

use glam::Vec2;
use musync::config::ParticleParams;
use musync::{ParticleDrive, ParticleField};

#[test]
fn max_bass_for_ten_thousand_ticks_stays_bounded() {
    let params = ParticleParams::default();
    let mut f = ParticleField::new(&params, 21);
    let mut max_r = 0.0f32;
    for i in 0..10_000 {
        let drive = ParticleDrive {
            time: i as f32 / 60.0,
            bass: 2.0,
            beat_intensity: 1.5,
            drag_velocity: Vec2::ZERO,
        };
        for p in f.tick(&drive, &params) {
            assert!(p.is_finite());
            max_r = max_r.max(p.length());
        }
    }
    assert!(max_r < 20.0, "particles drifted to r={max_r}");
}

#[test]
fn bass_pushes_shell_outward() {
    let params = ParticleParams::default();
    let mut f = ParticleField::new(&params, 2);
    let mean = |f: &ParticleField| {
        f.positions().iter().map(|p| p.length()).sum::<f32>() / f.len() as f32
    };
    let rest = mean(&f);
    let drive = ParticleDrive {
        bass: 1.0,
        ..ParticleDrive::default()
    };
    for _ in 0..30 {
        f.tick(&drive, &params);
    }
    assert!(mean(&f) > rest);
}

#[test]
fn quiet_shell_settles_on_rotated_orbit() {
    let params = ParticleParams::default();
    let mut f = ParticleField::new(&params, 8);
    let t = 1.5;
    let drive = ParticleDrive {
        time: t,
        ..ParticleDrive::default()
    };
    for _ in 0..2000 {
        f.tick(&drive, &params);
    }
    let (s, c) = ParticleField::orbit_angle(t, params.orbit_speed).sin_cos();
    for (p, r) in f.positions().iter().zip(f.rest_positions()) {
        let target = glam::Vec3::new(r.x * c - r.z * s, r.y, r.x * s + r.z * c);
        assert!((*p - target).length() < 1e-3);
    }
}

#[test]
fn drag_nudges_in_screen_plane() {
    let params = ParticleParams::default();
    let mut f = ParticleField::new(&params, 4);
    let before: Vec<_> = f.positions().to_vec();
    let drive = ParticleDrive {
        drag_velocity: Vec2::new(1.0, 0.0),
        ..ParticleDrive::default()
    };
    f.tick(&drive, &params);
    for (a, b) in before.iter().zip(f.positions()) {
        assert!(b.x > a.x);
        assert!((b.z - a.z).abs() < 1e-6);
    }
}
