//! Per-vertex displacement compositor.
//!
//! Every layer contributes a scalar; the sum rescales the rest position
//! along its own direction, so deformation is purely radial.

use crate::audio::BandEnergies;
use crate::config::{NoiseLayer, VisualizerConfig};
use crate::core::constants::{EPSILON, SUB_BAND_COUNT, WOBBLE_DISPLACEMENT_GAIN};
use crate::core::SimplexNoise;
use crate::error::{MusyncError, Result};
use crate::events::Interaction;
use crate::hotspot::HotspotField;
use crate::mesh::SphereMesh;
use crate::ripple::RippleField;
use glam::{Vec2, Vec3};

// Lower bound of the radial scale, keeps every vertex on its own ray.
pub const MIN_RADIAL_SCALE: f32 = 0.05;

/// Read-only view of the simulation state for one compositor pass.
pub struct DeformContext<'a> {
    pub time: f32,
    pub bands: &'a BandEnergies,
    pub beat_intensity: f32,
    /// `wobble_intensity * sin(wobble_phase)` from the jelly physics.
    pub wobble: f32,
    pub ripples: &'a RippleField,
    pub hotspots: &'a HotspotField,
    pub interaction: &'a Interaction,
    pub noise: &'a SimplexNoise,
    pub config: &'a VisualizerConfig,
}

// Per-frame values shared by every vertex.
struct FrameTerms {
    poke: f32,
    drag_magnitude: f32,
    drag_dir: Vec2,
    mouse_influence: f32,
    mouse_dir: Vec3,
}

impl FrameTerms {
    fn new(ctx: &DeformContext<'_>) -> Self {
        let ia = ctx.interaction;
        let params = &ctx.config.interaction;
        let drag_magnitude = ia.drag.offset.length();
        let mouse_dir = Vec3::new(ia.pointer.x, ia.pointer.y, 0.5);
        Self {
            poke: ia.poke.force,
            drag_magnitude,
            drag_dir: ia.drag.offset / (drag_magnitude + EPSILON),
            mouse_influence: ia.mouse_influence(params),
            mouse_dir: mouse_dir / (mouse_dir.length() + EPSILON),
        }
    }
}

#[inline]
fn layer_sample(noise: &SimplexNoise, p: Vec3, layer: &NoiseLayer, drift: Vec3, t: f32) -> f32 {
    let q = p * layer.scale + drift * (t * layer.speed);
    noise.sample(q)
}

pub struct Compositor;

impl Compositor {
    /// Total displacement at unit rest direction `n`.
    pub fn displacement_at(n: Vec3, ctx: &DeformContext<'_>) -> f32 {
        Self::displacement_with(n, ctx, &FrameTerms::new(ctx))
    }

    fn displacement_with(n: Vec3, ctx: &DeformContext<'_>, frame: &FrameTerms) -> f32 {
        let cfg = ctx.config;
        let bands = ctx.bands;
        let noise = ctx.noise;
        let t = ctx.time;
        let interact = cfg.interaction.enabled;
        let mut total = 0.0;

        // Bass noise also drives the beat pulse and the poke.
        let needs_bass = cfg.noise.enabled || (interact && frame.poke > 0.01);
        let bass_noise = if needs_bass {
            layer_sample(noise, n, &cfg.noise.bass, Vec3::new(1.0, 0.7, 0.0), t)
        } else {
            0.0
        };

        if cfg.noise.enabled {
            let np = &cfg.noise;
            total += bass_noise * np.bass.amplitude * (0.3 + bands.bass * 1.5);

            let mid = layer_sample(noise, n, &np.mid, Vec3::new(1.0, -0.5, 0.3), t);
            total += mid * np.mid.amplitude * (0.2 + bands.mid * 1.2);

            // Half-wave rectified: spikes only, no valleys.
            let high = layer_sample(noise, n, &np.high, Vec3::new(1.0, 1.2, -0.8), t);
            total += high.max(0.0) * np.high.amplitude * (0.1 + bands.high * 2.0);

            let detail = layer_sample(noise, n, &np.detail, Vec3::new(0.5, 0.0, 1.0), t);
            total += detail * np.detail.amplitude;

            total += Self::sub_band_detail(n, t, bands, noise, np.sub_band_gate, np.sub_band_gain);
            total += ctx.beat_intensity * np.beat_pulse_gain * bass_noise;
        }

        if cfg.spatial.enabled {
            let sp = &cfg.spatial;
            let y = n.y;
            total += (-y).max(0.0) * bands.bass * sp.bass_bottom_bias;
            total += y.max(0.0) * bands.high * sp.high_top_bias * 0.5;
            total += (1.0 - y.abs()) * bands.mid * sp.mid_equator_bias;
        }

        if cfg.hotspots.enabled {
            total += ctx.hotspots.displacement_at(n, t, noise);
        }

        if cfg.physics.wobble_enabled {
            total += ctx.wobble
                * WOBBLE_DISPLACEMENT_GAIN
                * (1.0 + (n.x * 3.0 + n.y * 2.0 + n.z).sin());
        }

        if cfg.ripples.enabled {
            total += ctx.ripples.displacement_at(n, &cfg.ripples);
        }

        if interact {
            total += Self::interaction_term(n, bass_noise, frame);
        }

        total
    }

    fn sub_band_detail(
        n: Vec3,
        t: f32,
        bands: &BandEnergies,
        noise: &SimplexNoise,
        gate: f32,
        gain: f32,
    ) -> f32 {
        let mut sum = 0.0;
        for b in 0..SUB_BAND_COUNT {
            let energy = bands.sub_bands[b];
            if energy <= gate {
                continue;
            }
            let scale = 2.0 + b as f32 * 0.8;
            let speed = 0.5 + b as f32 * 0.3;
            let v = noise.noise3d(
                n.x * scale + t * speed + b as f32,
                n.y * scale,
                n.z * scale - t * speed * 0.5,
            );
            sum += v * energy * gain;
        }
        sum
    }

    fn interaction_term(n: Vec3, bass_noise: f32, frame: &FrameTerms) -> f32 {
        let mut out = 0.0;
        if frame.poke > 0.01 {
            out += frame.poke * bass_noise * 0.6;
        }
        if frame.drag_magnitude > 0.01 {
            let alignment = n.x * frame.drag_dir.x + n.y * frame.drag_dir.y;
            // Leading side bulges harder than the trailing side shrinks.
            let gain = if alignment > 0.0 { 2.0 } else { 0.5 };
            out += alignment * frame.drag_magnitude * gain;
        }
        if frame.mouse_influence > 0.0 {
            let dot = n.dot(frame.mouse_dir);
            if dot > 0.0 {
                out += dot * frame.mouse_influence * 0.4;
            }
        }
        out
    }

    /// Deform `rest` positions into a new buffer.
    ///
    /// A non-finite result is a hard error; nothing is written.
    pub fn deform(rest: &[Vec3], ctx: &DeformContext<'_>) -> Result<Vec<Vec3>> {
        let frame = FrameTerms::new(ctx);
        let breathing = ctx.config.global_breathing;
        rest.iter()
            .enumerate()
            .map(|(i, &p)| {
                let scale = breathing + Self::displacement_with(p.normalize_or_zero(), ctx, &frame);
                if !scale.is_finite() {
                    return Err(MusyncError::NonFiniteVertex { index: i });
                }
                Ok(p * scale.max(MIN_RADIAL_SCALE))
            })
            .collect()
    }

    /// Deform a mesh in place and recompute its normals.
    pub fn deform_mesh(mesh: &mut SphereMesh, ctx: &DeformContext<'_>) -> Result<()> {
        let positions = Self::deform(mesh.rest_positions(), ctx)?;
        mesh.positions_mut().copy_from_slice(&positions);
        mesh.recompute_normals();
        Ok(())
    }
}
