//! One tick of the visualizer: audio -> physics -> effect layers ->
//! chromatics -> compositor.
//!
//! [`Session`] owns every mutable buffer. Ticks must be invoked strictly in
//! sequence; nothing here blocks or allocates per vertex beyond the output
//! buffer.

use crate::audio::{AudioAnalyzer, BeatEvent};
use crate::chromatics::{ChromaticEngine, ChromaticFrame, Theme};
use crate::config::VisualizerConfig;
use crate::core::constants::*;
use crate::core::SimplexNoise;
use crate::deform::{Compositor, DeformContext};
use crate::error::{ensure_finite, Result};
use crate::events::{command_for_key, Interaction, KeyCommand};
use crate::hotspot::{random_unit_vector, HotspotField};
use crate::mesh::SphereMesh;
use crate::particles::{ParticleDrive, ParticleField};
use crate::physics::PointerPhysics;
use crate::ripple::RippleField;
use glam::{Vec2, Vec3};
use rand::prelude::*;

// Sub-seed streams so each subsystem can be reseeded independently.
const NOISE_STREAM: u64 = 0;
const HOTSPOT_STREAM: u64 = 1;
const PARTICLE_STREAM: u64 = 2;
const BEAT_STREAM: u64 = 3;

#[inline]
fn sub_seed(seed: u64, stream: u64) -> u64 {
    seed ^ stream.wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// What the renderer needs after a tick.
pub struct FrameOutput<'a> {
    pub positions: &'a [Vec3],
    pub normals: &'a [Vec3],
    pub particles: &'a [Vec3],
    pub particles_visible: bool,
    pub chromatic: ChromaticFrame,
    pub particle_color: Vec3,
    pub background_color: Vec3,
    /// Rigid XY offset of the whole mesh from the jelly physics.
    pub mesh_offset: Vec2,
    /// Euler rotation of the mesh: `x` tilt and `y` spin, radians.
    pub mesh_rotation: Vec2,
    pub beat: bool,
    pub paused: bool,
}

pub struct Session {
    config: VisualizerConfig,
    noise: SimplexNoise,
    analyzer: AudioAnalyzer,
    physics: PointerPhysics,
    ripples: RippleField,
    hotspots: HotspotField,
    particles: ParticleField,
    chromatics: ChromaticEngine,
    interaction: Interaction,
    mesh: SphereMesh,
    rng: StdRng,
    time: f32,
    rotation: Vec2,
    paused: bool,
    frames: u64,
}

impl Session {
    pub fn new(config: VisualizerConfig) -> Result<Self> {
        config.validate()?;
        let seed = config.seed;
        let mesh = SphereMesh::new(config.base_radius, config.segments, config.segments)?;
        let session = Self {
            noise: SimplexNoise::new(sub_seed(seed, NOISE_STREAM)),
            analyzer: AudioAnalyzer::new(),
            physics: PointerPhysics::new(),
            ripples: RippleField::new(),
            hotspots: HotspotField::new(config.hotspots.count, sub_seed(seed, HOTSPOT_STREAM)),
            particles: ParticleField::new(&config.particles, sub_seed(seed, PARTICLE_STREAM)),
            chromatics: ChromaticEngine::new(config.chromatics.theme),
            interaction: Interaction::default(),
            mesh,
            rng: StdRng::seed_from_u64(sub_seed(seed, BEAT_STREAM)),
            time: 0.0,
            rotation: Vec2::ZERO,
            paused: false,
            frames: 0,
            config,
        };
        log::info!(
            "[session] seed={:#x} verts={} particles={} hotspots={}",
            seed,
            session.mesh.vertex_count(),
            session.particles.len(),
            session.hotspots.hotspots().len()
        );
        Ok(session)
    }

    /// Advance one frame. `snapshot` holds normalised bin magnitudes, or
    /// `None` when no audio source is active.
    ///
    /// While paused nothing advances and the last state is returned.
    pub fn tick(&mut self, dt: f32, snapshot: Option<&[f32]>) -> Result<FrameOutput<'_>> {
        let dt = ensure_finite("dt", dt)?.max(0.0);
        if self.paused {
            return Ok(self.output(false));
        }
        self.time += dt;
        self.frames += 1;

        let beat = self
            .analyzer
            .analyze(snapshot, &self.config.bands, &self.config.beat);
        if let Some(ev) = beat {
            self.on_beat(ev);
        }
        self.hotspots.tick(&self.config.hotspots);

        self.physics.update(
            self.interaction.pointer.down,
            self.interaction.pointer_ndc(),
            dt,
            &self.config.physics,
        );
        self.ripples.tick(dt, &self.config.ripples);

        let bands = &self.analyzer.bands;
        let beat_intensity = self.analyzer.beat.intensity;
        if self.config.chromatics.enabled {
            self.chromatics
                .tick(bands.bass, bands.mid, beat_intensity, &self.config.chromatics);
        }
        if self.config.particles.enabled {
            let drive = ParticleDrive {
                time: self.time,
                bass: bands.bass,
                beat_intensity,
                drag_velocity: self.interaction.drag.velocity,
            };
            self.particles.tick(&drive, &self.config.particles);
            if self.config.chromatics.enabled {
                self.chromatics.ease_particles(PARTICLE_COLOR_EASE);
            }
        }

        self.interaction.tick_drag();
        self.deform()?;

        let t = self.time;
        self.rotation.y += self.config.rotation_speed * (1.0 + ROTATION_EASE * (t * 0.5).sin());
        self.rotation.x = (t * 0.2).sin() * TILT_AMPLITUDE;
        self.interaction.decay_poke(&self.config.interaction);

        Ok(self.output(beat.is_some()))
    }

    fn on_beat(&mut self, ev: BeatEvent) {
        if self.config.hotspots.enabled {
            self.hotspots
                .spike(&self.analyzer.bands, &self.config.hotspots);
        }
        if self.config.ripples.beat_trigger {
            let dir = random_unit_vector(&mut self.rng);
            self.ripples
                .spawn(dir, ev.intensity * BEAT_RIPPLE_STRENGTH, &self.config.ripples);
        }
        self.physics
            .add_wobble(ev.intensity * self.config.beat.wobble_gain);
    }

    fn deform(&mut self) -> Result<()> {
        let ctx = DeformContext {
            time: self.time,
            bands: &self.analyzer.bands,
            beat_intensity: self.analyzer.beat.intensity,
            wobble: self.physics.wobble(),
            ripples: &self.ripples,
            hotspots: &self.hotspots,
            interaction: &self.interaction,
            noise: &self.noise,
            config: &self.config,
        };
        Compositor::deform_mesh(&mut self.mesh, &ctx)
    }

    fn output(&self, beat: bool) -> FrameOutput<'_> {
        FrameOutput {
            positions: self.mesh.positions(),
            normals: self.mesh.normals(),
            particles: self.particles.positions(),
            particles_visible: self.config.particles.enabled,
            chromatic: self.chromatics.frame(),
            particle_color: self.chromatics.particle_color(),
            background_color: self.chromatics.background_color(),
            mesh_offset: self.physics.position,
            mesh_rotation: self.rotation,
            beat,
            paused: self.paused,
        }
    }

    // ---------------- Pointer input ----------------

    pub fn pointer_move(&mut self, ndc: Vec2) -> Result<()> {
        ensure_finite("pointer x", ndc.x)?;
        ensure_finite("pointer y", ndc.y)?;
        self.interaction.move_to(ndc);
        Ok(())
    }

    /// Press: poke, click ripple at the pointer and a wobble kick.
    pub fn pointer_down(&mut self) {
        let dir = self.interaction.press(&self.config.interaction);
        self.after_press(dir);
    }

    pub fn pointer_up(&mut self) {
        self.interaction.release();
    }

    pub fn pointer_enter(&mut self) {
        self.interaction.enter();
    }

    pub fn pointer_leave(&mut self) {
        self.interaction.leave();
    }

    pub fn touch_start(&mut self, ndc: Vec2) -> Result<()> {
        ensure_finite("touch x", ndc.x)?;
        ensure_finite("touch y", ndc.y)?;
        let dir = self.interaction.touch_start(ndc, &self.config.interaction);
        self.after_press(dir);
        Ok(())
    }

    pub fn touch_end(&mut self) {
        self.interaction.touch_end();
    }

    fn after_press(&mut self, ripple_dir: Vec3) {
        self.ripples.spawn(ripple_dir, 1.0, &self.config.ripples);
        self.physics.add_wobble(CLICK_WOBBLE);
    }

    /// Run a keyboard shortcut. Core commands are applied here; UI
    /// commands are returned for the caller to handle.
    pub fn handle_key(&mut self, key: &str) -> Option<KeyCommand> {
        let cmd = command_for_key(key)?;
        if !cmd.is_core() {
            return Some(cmd);
        }
        match cmd {
            KeyCommand::TogglePause => self.toggle_pause(),
            KeyCommand::ResetPosition => self.reset_position(),
            _ => {}
        }
        None
    }

    // ---------------- Session controls ----------------

    pub fn toggle_pause(&mut self) {
        self.set_paused(!self.paused);
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
        log::info!("[session] {}", if paused { "paused" } else { "resumed" });
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn reset_position(&mut self) {
        self.physics.reset();
        log::info!("[session] position reset");
    }

    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    /// Replace the whole configuration. Nothing changes unless `config`
    /// validates; components sized or seeded by it are rebuilt when those
    /// values change.
    pub fn set_config(&mut self, config: VisualizerConfig) -> Result<()> {
        config.validate()?;
        let old = &self.config;
        if config.base_radius != old.base_radius || config.segments != old.segments {
            self.mesh = SphereMesh::new(config.base_radius, config.segments, config.segments)?;
        }
        let seed = config.seed;
        let reseed = seed != old.seed;
        if reseed {
            self.noise = SimplexNoise::new(sub_seed(seed, NOISE_STREAM));
            self.rng = StdRng::seed_from_u64(sub_seed(seed, BEAT_STREAM));
        }
        if reseed || config.hotspots.count != old.hotspots.count {
            self.hotspots = HotspotField::new(config.hotspots.count, sub_seed(seed, HOTSPOT_STREAM));
        }
        if reseed
            || config.particles.count != old.particles.count
            || config.particles.orbit_radius != old.particles.orbit_radius
        {
            self.particles = ParticleField::new(&config.particles, sub_seed(seed, PARTICLE_STREAM));
        }
        if config.chromatics.theme != old.chromatics.theme {
            self.chromatics.apply_theme(config.chromatics.theme);
        }
        self.config = config;
        Ok(())
    }

    fn update_config(&mut self, edit: impl FnOnce(&mut VisualizerConfig)) -> Result<()> {
        let mut next = self.config.clone();
        edit(&mut next);
        self.set_config(next)
    }

    /// Rebuilds the mesh at the new rest radius.
    pub fn set_base_radius(&mut self, radius: f32) -> Result<()> {
        self.update_config(|c| c.base_radius = radius)
    }

    pub fn set_sensitivity(&mut self, sensitivity: f32) -> Result<()> {
        self.update_config(|c| c.beat.sensitivity = sensitivity)
    }

    pub fn set_damping(&mut self, damping: f32) -> Result<()> {
        self.update_config(|c| c.physics.damping = damping)
    }

    pub fn set_particles_enabled(&mut self, enabled: bool) {
        self.config.particles.enabled = enabled;
    }

    pub fn set_chromatics_enabled(&mut self, enabled: bool) {
        self.config.chromatics.enabled = enabled;
    }

    pub fn apply_theme(&mut self, theme: Theme) {
        self.config.chromatics.theme = theme;
        self.chromatics.apply_theme(theme);
    }

    /// Unknown keys fall back to the default theme.
    pub fn apply_theme_key(&mut self, key: &str) {
        self.apply_theme(Theme::from_key_or_default(key));
    }

    /// Restore the user-facing settings to their defaults.
    pub fn reset_settings(&mut self) -> Result<()> {
        let d = VisualizerConfig::default();
        self.update_config(|c| {
            c.beat.sensitivity = d.beat.sensitivity;
            c.physics.damping = d.physics.damping;
            c.particles.enabled = d.particles.enabled;
            c.chromatics.enabled = d.chromatics.enabled;
            c.base_radius = d.base_radius;
        })?;
        self.apply_theme(Theme::default());
        log::info!("[session] settings reset to defaults");
        Ok(())
    }

    // ---------------- Accessors ----------------

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn analyzer(&self) -> &AudioAnalyzer {
        &self.analyzer
    }

    pub fn physics(&self) -> &PointerPhysics {
        &self.physics
    }

    pub fn ripples(&self) -> &RippleField {
        &self.ripples
    }

    pub fn hotspots(&self) -> &HotspotField {
        &self.hotspots
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    pub fn chromatics(&self) -> &ChromaticEngine {
        &self.chromatics
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn mesh(&self) -> &SphereMesh {
        &self.mesh
    }

    pub fn noise(&self) -> &SimplexNoise {
        &self.noise
    }
}
