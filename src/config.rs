//! Tunable parameters for every effect layer.
//!
//! All structs are plain data with `Default` impls built from
//! [`crate::core::constants`]. A session owns one [`VisualizerConfig`] and
//! passes borrowed sub-structs into each component's update call.

use crate::chromatics::Theme;
use crate::core::constants::*;
use crate::error::{MusyncError, Result};

/// One noise octave: spatial scale, scroll speed and output amplitude.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseLayer {
    pub scale: f32,
    pub speed: f32,
    pub amplitude: f32,
}

impl NoiseLayer {
    pub const fn new(scale: f32, speed: f32, amplitude: f32) -> Self {
        Self {
            scale,
            speed,
            amplitude,
        }
    }
}

/// Noise-driven surface layers. `enabled` gates the four base layers, the
/// beat pulse (which rides on the bass layer) and the sub-band detail.
#[derive(Clone, Debug, PartialEq)]
pub struct NoiseParams {
    pub enabled: bool,
    pub bass: NoiseLayer,
    pub mid: NoiseLayer,
    pub high: NoiseLayer,
    pub detail: NoiseLayer,
    pub sub_band_gate: f32,
    pub sub_band_gain: f32,
    pub beat_pulse_gain: f32,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            enabled: true,
            bass: NoiseLayer::new(1.2, 0.3, 0.4),
            mid: NoiseLayer::new(2.5, 0.8, 0.25),
            high: NoiseLayer::new(4.0, 2.0, 0.35),
            detail: NoiseLayer::new(6.0, 1.5, 0.08),
            sub_band_gate: SUB_BAND_GATE,
            sub_band_gain: SUB_BAND_DETAIL_GAIN,
            beat_pulse_gain: BEAT_PULSE_GAIN,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PhysicsParams {
    pub spring_strength: f32,
    pub damping: f32,
    pub bounce_elasticity: f32,
    pub max_displacement: f32,
    pub wobble_frequency: f32,
    pub wobble_decay: f32,
    /// When false the wobble term is left out of the compositor sum.
    pub wobble_enabled: bool,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            spring_strength: SPRING_STRENGTH,
            damping: DAMPING,
            bounce_elasticity: BOUNCE_ELASTICITY,
            max_displacement: MAX_DISPLACEMENT,
            wobble_frequency: WOBBLE_FREQUENCY,
            wobble_decay: WOBBLE_DECAY,
            wobble_enabled: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RippleParams {
    pub enabled: bool,
    pub max_ripples: usize,
    pub speed: f32,
    pub wavelength: f32,
    pub amplitude: f32,
    pub decay: f32,
    pub max_age: f32,
    /// Spawn a ripple at a random direction on every detected beat.
    pub beat_trigger: bool,
}

impl Default for RippleParams {
    fn default() -> Self {
        Self {
            enabled: true,
            max_ripples: MAX_RIPPLES,
            speed: RIPPLE_SPEED,
            wavelength: RIPPLE_WAVELENGTH,
            amplitude: RIPPLE_AMPLITUDE,
            decay: RIPPLE_DECAY,
            max_age: RIPPLE_MAX_AGE,
            beat_trigger: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParticleParams {
    pub enabled: bool,
    pub count: usize,
    pub orbit_radius: f32,
    pub orbit_speed: f32,
    pub repulsion_force: f32,
    pub beat_repulsion: f32,
    pub return_speed: f32,
    pub damping: f32,
}

impl Default for ParticleParams {
    fn default() -> Self {
        Self {
            enabled: true,
            count: PARTICLE_COUNT,
            orbit_radius: PARTICLE_ORBIT_RADIUS,
            orbit_speed: PARTICLE_ORBIT_SPEED,
            repulsion_force: PARTICLE_REPULSION,
            beat_repulsion: PARTICLE_BEAT_REPULSION,
            return_speed: PARTICLE_RETURN_SPEED,
            damping: PARTICLE_DAMPING,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChromaticParams {
    pub enabled: bool,
    pub theme: Theme,
    pub emissive_intensity: f32,
    pub transition_speed: f32,
}

impl Default for ChromaticParams {
    fn default() -> Self {
        Self {
            enabled: true,
            theme: Theme::default(),
            emissive_intensity: EMISSIVE_INTENSITY,
            transition_speed: COLOR_TRANSITION_SPEED,
        }
    }
}

/// Vertical bias: bass swells the lower hemisphere, highs the upper one,
/// mids the equator.
#[derive(Clone, Debug, PartialEq)]
pub struct SpatialParams {
    pub enabled: bool,
    pub bass_bottom_bias: f32,
    pub high_top_bias: f32,
    pub mid_equator_bias: f32,
}

impl Default for SpatialParams {
    fn default() -> Self {
        Self {
            enabled: true,
            bass_bottom_bias: BASS_BOTTOM_BIAS,
            high_top_bias: HIGH_TOP_BIAS,
            mid_equator_bias: MID_EQUATOR_BIAS,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HotspotParams {
    pub enabled: bool,
    pub count: usize,
    pub spike_strength: f32,
    pub decay: f32,
}

impl Default for HotspotParams {
    fn default() -> Self {
        Self {
            enabled: true,
            count: HOTSPOT_COUNT,
            spike_strength: HOTSPOT_SPIKE_STRENGTH,
            decay: HOTSPOT_DECAY,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BeatParams {
    /// Energy-delta threshold at zero energy.
    pub threshold: f32,
    pub sensitivity: f32,
    pub decay_rate: f32,
    /// Wobble added to the jelly physics per detected beat, times intensity.
    pub wobble_gain: f32,
}

impl Default for BeatParams {
    fn default() -> Self {
        Self {
            threshold: BEAT_THRESHOLD,
            sensitivity: BEAT_SENSITIVITY,
            decay_rate: BEAT_DECAY,
            wobble_gain: BEAT_WOBBLE_GAIN,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BandMultipliers {
    pub bass: f32,
    pub mid: f32,
    pub high: f32,
    pub sub_band: f32,
}

impl Default for BandMultipliers {
    fn default() -> Self {
        Self {
            bass: BASS_MULTIPLIER,
            mid: MID_MULTIPLIER,
            high: HIGH_MULTIPLIER,
            sub_band: SUB_BAND_MULTIPLIER,
        }
    }
}

/// Pointer-driven surface terms: poke, drag bulge and hover attraction.
#[derive(Clone, Debug, PartialEq)]
pub struct InteractionParams {
    pub enabled: bool,
    pub mouse_influence: f32,
    pub poke_force: f32,
    pub poke_decay: f32,
}

impl Default for InteractionParams {
    fn default() -> Self {
        Self {
            enabled: true,
            mouse_influence: MOUSE_INFLUENCE,
            poke_force: POKE_FORCE,
            poke_decay: POKE_DECAY,
        }
    }
}

/// Full session configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct VisualizerConfig {
    pub base_radius: f32,
    pub segments: u32,
    pub global_breathing: f32,
    pub rotation_speed: f32,
    pub seed: u64,
    pub noise: NoiseParams,
    pub physics: PhysicsParams,
    pub ripples: RippleParams,
    pub particles: ParticleParams,
    pub chromatics: ChromaticParams,
    pub spatial: SpatialParams,
    pub hotspots: HotspotParams,
    pub beat: BeatParams,
    pub bands: BandMultipliers,
    pub interaction: InteractionParams,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            base_radius: BASE_RADIUS,
            segments: SPHERE_SEGMENTS,
            global_breathing: GLOBAL_BREATHING,
            rotation_speed: ROTATION_SPEED,
            seed: DEFAULT_SEED,
            noise: NoiseParams::default(),
            physics: PhysicsParams::default(),
            ripples: RippleParams::default(),
            particles: ParticleParams::default(),
            chromatics: ChromaticParams::default(),
            spatial: SpatialParams::default(),
            hotspots: HotspotParams::default(),
            beat: BeatParams::default(),
            bands: BandMultipliers::default(),
            interaction: InteractionParams::default(),
        }
    }
}

impl VisualizerConfig {
    /// Every displacement layer switched off: the compositor then returns
    /// `rest * global_breathing` for every vertex.
    pub fn effects_disabled() -> Self {
        let mut cfg = Self::default();
        cfg.noise.enabled = false;
        cfg.physics.wobble_enabled = false;
        cfg.ripples.enabled = false;
        cfg.particles.enabled = false;
        cfg.spatial.enabled = false;
        cfg.hotspots.enabled = false;
        cfg.interaction.enabled = false;
        cfg
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check ranges that would otherwise blow up the simulation.
    pub fn validate(&self) -> Result<()> {
        positive("base_radius", self.base_radius)?;
        if self.segments < 3 {
            return Err(invalid("segments", format!("{} < 3", self.segments)));
        }
        finite("global_breathing", self.global_breathing)?;
        finite("rotation_speed", self.rotation_speed)?;

        for (field, layer) in [
            ("noise.bass", &self.noise.bass),
            ("noise.mid", &self.noise.mid),
            ("noise.high", &self.noise.high),
            ("noise.detail", &self.noise.detail),
        ] {
            finite(field, layer.scale)?;
            finite(field, layer.speed)?;
            finite(field, layer.amplitude)?;
        }

        let p = &self.physics;
        finite("physics.spring_strength", p.spring_strength)?;
        retention("physics.damping", p.damping)?;
        retention("physics.bounce_elasticity", p.bounce_elasticity)?;
        positive("physics.max_displacement", p.max_displacement)?;
        finite("physics.wobble_frequency", p.wobble_frequency)?;
        retention("physics.wobble_decay", p.wobble_decay)?;

        let r = &self.ripples;
        if r.max_ripples == 0 {
            return Err(invalid("ripples.max_ripples", "must be at least 1".into()));
        }
        finite("ripples.speed", r.speed)?;
        positive("ripples.wavelength", r.wavelength)?;
        finite("ripples.amplitude", r.amplitude)?;
        retention("ripples.decay", r.decay)?;
        positive("ripples.max_age", r.max_age)?;

        let pa = &self.particles;
        positive("particles.orbit_radius", pa.orbit_radius)?;
        finite("particles.orbit_speed", pa.orbit_speed)?;
        finite("particles.repulsion_force", pa.repulsion_force)?;
        finite("particles.return_speed", pa.return_speed)?;
        retention("particles.damping", pa.damping)?;

        let c = &self.chromatics;
        finite("chromatics.emissive_intensity", c.emissive_intensity)?;
        retention("chromatics.transition_speed", c.transition_speed)?;

        retention("hotspots.decay", self.hotspots.decay)?;
        finite("hotspots.spike_strength", self.hotspots.spike_strength)?;

        finite("beat.threshold", self.beat.threshold)?;
        non_negative("beat.sensitivity", self.beat.sensitivity)?;
        retention("beat.decay_rate", self.beat.decay_rate)?;

        retention("interaction.poke_decay", self.interaction.poke_decay)?;
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> MusyncError {
    MusyncError::InvalidConfig { field, reason }
}

fn finite(field: &'static str, v: f32) -> Result<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, format!("{v} is not finite")))
    }
}

fn positive(field: &'static str, v: f32) -> Result<()> {
    finite(field, v)?;
    if v > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("{v} must be > 0")))
    }
}

fn non_negative(field: &'static str, v: f32) -> Result<()> {
    finite(field, v)?;
    if v >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("{v} must be >= 0")))
    }
}

// Multiplicative per-tick factors must lie in (0, 1].
fn retention(field: &'static str, v: f32) -> Result<()> {
    finite(field, v)?;
    if v > 0.0 && v <= 1.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("{v} outside (0, 1]")))
    }
}
