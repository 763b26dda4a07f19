// Host-side tests for the displacement compositor.

use glam::{Vec2, Vec3};
use musync::deform::MIN_RADIAL_SCALE;
use musync::events::Interaction;
use musync::{
    BandEnergies, Compositor, DeformContext, HotspotField, MusyncError, RippleField, SimplexNoise,
    SphereMesh, VisualizerConfig,
};

struct Scene {
    bands: BandEnergies,
    ripples: RippleField,
    hotspots: HotspotField,
    interaction: Interaction,
    noise: SimplexNoise,
    config: VisualizerConfig,
}

impl Scene {
    fn new(config: VisualizerConfig) -> Self {
        Self {
            bands: BandEnergies::default(),
            ripples: RippleField::new(),
            hotspots: HotspotField::new(config.hotspots.count, 1),
            interaction: Interaction::default(),
            noise: SimplexNoise::new(1),
            config,
        }
    }

    fn ctx(&self, time: f32, beat_intensity: f32, wobble: f32) -> DeformContext<'_> {
        DeformContext {
            time,
            bands: &self.bands,
            beat_intensity,
            wobble,
            ripples: &self.ripples,
            hotspots: &self.hotspots,
            interaction: &self.interaction,
            noise: &self.noise,
            config: &self.config,
        }
    }
}

// Busy scene: every layer active at once.
fn busy() -> Scene {
    let mut s = Scene::new(VisualizerConfig::default());
    s.bands = BandEnergies {
        bass: 1.2,
        mid: 0.8,
        high: 0.9,
        sub_bands: [0.7; 8],
    };
    s.ripples.spawn(Vec3::X, 1.0, &s.config.ripples);
    s.ripples.tick(0.05, &s.config.ripples);
    s.hotspots.spike(&s.bands, &s.config.hotspots);
    s.interaction.pointer.over = true;
    s.interaction.pointer.x = 0.3;
    s.interaction.poke.force = 1.0;
    s.interaction.drag.offset = Vec2::new(0.4, -0.1);
    s
}

fn assert_radial(rest: &[Vec3], out: &[Vec3]) -> f32 {
    let mut min_scale = f32::MAX;
    for (r, p) in rest.iter().zip(out) {
        let s = p.dot(*r) / r.length_squared();
        assert!((*p - *r * s).length() < 1e-4, "tangential offset at {r:?}");
        assert!(s >= MIN_RADIAL_SCALE - 1e-6);
        min_scale = min_scale.min(s);
    }
    min_scale
}

#[test]
fn disabled_effects_return_rest_positions() {
    let mut config = VisualizerConfig::effects_disabled();
    config.base_radius = 1.0;
    let scene = Scene::new(config);
    let mesh = SphereMesh::new(1.0, 32, 16).expect("mesh");
    let out = Compositor::deform(mesh.rest_positions(), &scene.ctx(3.0, 1.0, 0.5)).expect("deform");
    assert_eq!(out.as_slice(), mesh.rest_positions());
}

#[test]
fn breathing_scales_uniformly() {
    let mut config = VisualizerConfig::effects_disabled();
    config.global_breathing = 1.1;
    let scene = Scene::new(config);
    let mesh = SphereMesh::new(1.0, 16, 8).expect("mesh");
    let out = Compositor::deform(mesh.rest_positions(), &scene.ctx(0.0, 0.0, 0.0)).expect("deform");
    for (r, p) in mesh.rest_positions().iter().zip(&out) {
        assert!((*p - *r * 1.1).length() < 1e-6);
    }
}

#[test]
fn busy_scene_deforms_radially() {
    let scene = busy();
    let mesh = SphereMesh::new(0.9, 48, 24).expect("mesh");
    let ctx = scene.ctx(1.7, 1.2, 0.4);
    let out = Compositor::deform(mesh.rest_positions(), &ctx).expect("deform");
    assert_radial(mesh.rest_positions(), &out);
    // Something actually moved.
    assert!(mesh
        .rest_positions()
        .iter()
        .zip(&out)
        .any(|(r, p)| (*p - *r).length() > 1e-3));
}

#[test]
fn inverted_vertices_are_clamped() {
    let mut scene = busy();
    scene.config.noise.bass.amplitude = 60.0;
    let mesh = SphereMesh::new(1.0, 32, 16).expect("mesh");
    let out = Compositor::deform(mesh.rest_positions(), &scene.ctx(0.4, 0.0, 0.0)).expect("deform");
    let min_scale = assert_radial(mesh.rest_positions(), &out);
    assert!((min_scale - MIN_RADIAL_SCALE).abs() < 1e-6);
}

#[test]
fn drag_bulges_leading_side_more() {
    let mut scene = Scene::new(VisualizerConfig::effects_disabled());
    scene.config.interaction.enabled = true;
    scene.interaction.drag.offset = Vec2::new(0.5, 0.0);
    let ctx = scene.ctx(0.0, 0.0, 0.0);
    let lead = Compositor::displacement_at(Vec3::X, &ctx);
    let trail = Compositor::displacement_at(-Vec3::X, &ctx);
    assert!(lead > 0.0 && trail < 0.0);
    assert!((lead / -trail - 4.0).abs() < 1e-3);
}

#[test]
fn non_finite_state_is_rejected() {
    let scene = busy();
    let mut mesh = SphereMesh::new(1.0, 16, 8).expect("mesh");
    let before = mesh.positions().to_vec();
    let err = Compositor::deform_mesh(&mut mesh, &scene.ctx(0.5, f32::NAN, 0.0));
    assert!(matches!(err, Err(MusyncError::NonFiniteVertex { .. })));
    assert_eq!(mesh.positions(), before.as_slice());
}

#[test]
fn deform_mesh_refreshes_normals() {
    let scene = busy();
    let mut mesh = SphereMesh::new(1.0, 32, 16).expect("mesh");
    Compositor::deform_mesh(&mut mesh, &scene.ctx(0.8, 0.6, 0.2)).expect("deform");
    for n in mesh.normals() {
        assert!((n.length() - 1.0).abs() < 1e-3);
    }
}

// Noise layers on, every amplitude and gain zeroed; tests switch one back on.
fn silent_noise() -> VisualizerConfig {
    let mut config = VisualizerConfig::effects_disabled();
    let np = &mut config.noise;
    np.enabled = true;
    np.bass.amplitude = 0.0;
    np.mid.amplitude = 0.0;
    np.high.amplitude = 0.0;
    np.detail.amplitude = 0.0;
    np.sub_band_gain = 0.0;
    np.beat_pulse_gain = 0.0;
    config
}

fn directions() -> Vec<Vec3> {
    SphereMesh::new(1.0, 24, 12)
        .expect("mesh")
        .positions()
        .iter()
        .map(|p| p.normalize_or_zero())
        .filter(|n| *n != Vec3::ZERO)
        .collect()
}

#[test]
fn high_layer_only_pushes_outward() {
    let mut config = silent_noise();
    config.noise.high.amplitude = 0.35;
    let layer = config.noise.high;
    let mut s = Scene::new(config);
    s.bands.high = 1.0;
    let ctx = s.ctx(0.0, 0.0, 0.0);

    let mut flat = 0;
    for n in directions() {
        let raw = s.noise.sample(n * layer.scale);
        let d = Compositor::displacement_at(n, &ctx);
        assert!(d >= 0.0, "valley at {n:?}");
        let want = raw.max(0.0) * 0.35 * (0.1 + 2.0);
        assert!((d - want).abs() < 1e-5, "{d} vs {want} at {n:?}");
        if raw < 0.0 {
            flat += 1;
        }
    }
    assert!(flat > 0, "no negative samples to rectify");
}

#[test]
fn sub_bands_at_gate_contribute_nothing() {
    let mut config = silent_noise();
    config.noise.sub_band_gain = 0.08;
    let gate = config.noise.sub_band_gate;
    let mut s = Scene::new(config);

    s.bands.sub_bands = [gate; 8];
    let ctx = s.ctx(0.7, 0.0, 0.0);
    for n in directions() {
        assert_eq!(Compositor::displacement_at(n, &ctx), 0.0);
    }

    s.bands.sub_bands = [0.0; 8];
    s.bands.sub_bands[3] = 0.2;
    let ctx = s.ctx(0.7, 0.0, 0.0);
    let moved = directions()
        .into_iter()
        .filter(|&n| Compositor::displacement_at(n, &ctx).abs() > 1e-6)
        .count();
    assert!(moved > 0);
}

#[test]
fn spatial_bias_places_bands_on_the_sphere() {
    let mut config = VisualizerConfig::effects_disabled();
    config.spatial.enabled = true;
    let sp = config.spatial.clone();
    let mut s = Scene::new(config);
    let (bottom, top, equator) = (Vec3::NEG_Y, Vec3::Y, Vec3::X);

    s.bands = BandEnergies {
        bass: 1.0,
        ..BandEnergies::default()
    };
    let ctx = s.ctx(0.0, 0.0, 0.0);
    assert!((Compositor::displacement_at(bottom, &ctx) - sp.bass_bottom_bias).abs() < 1e-6);
    assert_eq!(Compositor::displacement_at(top, &ctx), 0.0);
    assert_eq!(Compositor::displacement_at(equator, &ctx), 0.0);

    s.bands = BandEnergies {
        high: 1.0,
        ..BandEnergies::default()
    };
    let ctx = s.ctx(0.0, 0.0, 0.0);
    assert!((Compositor::displacement_at(top, &ctx) - sp.high_top_bias * 0.5).abs() < 1e-6);
    assert_eq!(Compositor::displacement_at(bottom, &ctx), 0.0);

    s.bands = BandEnergies {
        mid: 1.0,
        ..BandEnergies::default()
    };
    let ctx = s.ctx(0.0, 0.0, 0.0);
    assert!((Compositor::displacement_at(equator, &ctx) - sp.mid_equator_bias).abs() < 1e-6);
    assert!(Compositor::displacement_at(top, &ctx).abs() < 1e-6);
    assert!(Compositor::displacement_at(bottom, &ctx).abs() < 1e-6);
}

#[test]
fn beat_pulse_scales_bass_noise() {
    let mut config = silent_noise();
    config.noise.beat_pulse_gain = 0.2;
    let bass_scale = config.noise.bass.scale;
    let s = Scene::new(config);

    let quiet = s.ctx(0.0, 0.0, 0.0);
    let pulse = s.ctx(0.0, 1.5, 0.0);
    for n in directions() {
        assert_eq!(Compositor::displacement_at(n, &quiet), 0.0);
        let want = 1.5 * 0.2 * s.noise.sample(n * bass_scale);
        let got = Compositor::displacement_at(n, &pulse);
        assert!((got - want).abs() < 1e-5, "{got} vs {want} at {n:?}");
    }
}
