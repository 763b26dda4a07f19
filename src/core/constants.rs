// Default tuning constants for the blob visualizer.
//
// Every parameter struct in `config` builds its `Default` from these values.

// Mesh
pub const BASE_RADIUS: f32 = 0.9; // rest radius of the blob
pub const SPHERE_SEGMENTS: u32 = 128; // width and height segments of the UV sphere
pub const ROTATION_SPEED: f32 = 0.0004; // radians per tick around Y
pub const ROTATION_EASE: f32 = 0.3; // +/- fraction applied to the rotation speed
pub const TILT_AMPLITUDE: f32 = 0.1; // radians of X tilt sway

// Jelly physics (spring-mass-damper)
pub const SPRING_STRENGTH: f32 = 0.08; // pull toward rest / pointer target
pub const DAMPING: f32 = 0.92; // velocity retention per tick
pub const BOUNCE_ELASTICITY: f32 = 0.7; // speed kept after an edge bounce
pub const MAX_DISPLACEMENT: f32 = 2.5; // edge of the bounce box
pub const WOBBLE_FREQUENCY: f32 = 3.0; // wobble phase advance per second
pub const WOBBLE_DECAY: f32 = 0.95; // wobble retention per tick
pub const DRAG_TARGET_SCALE: f32 = 2.0; // pointer NDC -> world target
pub const BOUNCE_WOBBLE_GAIN: f32 = 0.5;
pub const WOBBLE_SPEED_THRESHOLD: f32 = 0.1;
pub const WOBBLE_SPEED_GAIN: f32 = 0.1;
pub const WOBBLE_SPEED_CAP: f32 = 1.0;

// Ripples
pub const MAX_RIPPLES: usize = 10;
pub const RIPPLE_SPEED: f32 = 2.5; // age units per second
pub const RIPPLE_WAVELENGTH: f32 = 0.8; // radians between peaks
pub const RIPPLE_AMPLITUDE: f32 = 0.15;
pub const RIPPLE_DECAY: f32 = 0.97; // strength retention per tick
pub const RIPPLE_MAX_AGE: f32 = 3.0;
pub const RIPPLE_MIN_STRENGTH: f32 = 0.01;
pub const BEAT_RIPPLE_STRENGTH: f32 = 0.8; // fraction of beat intensity

// Particles
pub const PARTICLE_COUNT: usize = 250;
pub const PARTICLE_ORBIT_RADIUS: f32 = 2.0;
pub const PARTICLE_ORBIT_SPEED: f32 = 0.3; // radians per second
pub const PARTICLE_REPULSION: f32 = 0.5; // bass push
pub const PARTICLE_BEAT_REPULSION: f32 = 0.3;
pub const PARTICLE_RETURN_SPEED: f32 = 0.02;
pub const PARTICLE_DAMPING: f32 = 0.95;
pub const PARTICLE_SHELL_MIN: f32 = 0.8; // shell band as a fraction of orbit radius
pub const PARTICLE_SHELL_SPAN: f32 = 0.4;

// Chromatics
pub const EMISSIVE_INTENSITY: f32 = 0.8;
pub const COLOR_TRANSITION_SPEED: f32 = 0.15;
pub const PARTICLE_COLOR_EASE: f32 = 0.1;
pub const ENERGY_THRESHOLDS: [f32; 3] = [0.2, 0.5, 0.8]; // idle | low | high | peak

// Pointer interaction
pub const MOUSE_INFLUENCE: f32 = 0.6;
pub const POKE_FORCE: f32 = 1.0;
pub const POKE_DECAY: f32 = 0.92;
pub const DRAG_VELOCITY_GAIN: f32 = 5.0; // NDC delta -> drag velocity
pub const DRAG_OFFSET_GAIN: f32 = 0.15;
pub const DRAG_VELOCITY_DECAY: f32 = 0.85;
pub const DRAG_OFFSET_DECAY: f32 = 0.92;
pub const CLICK_RIPPLE_DEPTH: f32 = 0.5; // z of the click ripple direction
pub const CLICK_WOBBLE: f32 = 0.3;

// Audio band multipliers
pub const BASS_MULTIPLIER: f32 = 2.0;
pub const MID_MULTIPLIER: f32 = 1.5;
pub const HIGH_MULTIPLIER: f32 = 1.8;
pub const SUB_BAND_MULTIPLIER: f32 = 1.5;

// Audio band layout (fractions of the bin count)
pub const BASS_END_FRACTION: f32 = 0.08;
pub const MID_END_FRACTION: f32 = 0.4;
pub const SUB_BAND_COUNT: usize = 8;

// Audio smoothing (one-pole factors) and idle decay
pub const BASS_SMOOTHING: f32 = 0.35;
pub const MID_SMOOTHING: f32 = 0.3;
pub const HIGH_SMOOTHING: f32 = 0.4;
pub const SUB_BAND_SMOOTHING_BASE: f32 = 0.25;
pub const SUB_BAND_SMOOTHING_STEP: f32 = 0.03;
pub const IDLE_BAND_RETENTION: f32 = 0.95;
pub const IDLE_SUB_BAND_RETENTION: f32 = 0.92;
pub const IDLE_BEAT_RETENTION: f32 = 0.9;

// Beat detection
pub const BEAT_THRESHOLD: f32 = 0.65; // base energy-delta threshold
pub const BEAT_THRESHOLD_SLOPE: f32 = 0.3; // threshold shrink per unit energy
pub const BEAT_MIN_ENERGY: f32 = 0.3;
pub const BEAT_SENSITIVITY: f32 = 1.5;
pub const BEAT_DECAY: f32 = 0.98;
pub const BEAT_INTENSITY_MAX: f32 = 1.5;
pub const BEAT_WOBBLE_GAIN: f32 = 0.2;

// Hotspots
pub const HOTSPOT_COUNT: usize = 8;
pub const HOTSPOT_SPIKE_STRENGTH: f32 = 0.8;
pub const HOTSPOT_DECAY: f32 = 0.92;
pub const HOTSPOT_INTENSITY_MAX: f32 = 1.5;
pub const HOTSPOT_ACTIVE_MIN: f32 = 0.01;
pub const HOTSPOT_FALLOFF: f32 = 4.0; // gaussian sharpness
pub const HOTSPOT_MAX_SPIKES: usize = 3;

// Spatial frequency mapping
pub const BASS_BOTTOM_BIAS: f32 = 0.7;
pub const HIGH_TOP_BIAS: f32 = 0.6;
pub const MID_EQUATOR_BIAS: f32 = 0.3;

// Sub-band surface detail
pub const SUB_BAND_GATE: f32 = 0.1;
pub const SUB_BAND_DETAIL_GAIN: f32 = 0.08;

// Misc compositor weights
pub const BEAT_PULSE_GAIN: f32 = 0.2;
pub const WOBBLE_DISPLACEMENT_GAIN: f32 = 0.1;
pub const GLOBAL_BREATHING: f32 = 1.0;

// Numeric guard for normalisation denominators
pub const EPSILON: f32 = 0.001;

// Session defaults
pub const DEFAULT_SEED: u64 = 0x6D75_7379_6E63; // "musync"
