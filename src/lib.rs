//! Audio-reactive deformation core for the musync blob visualizer.
//!
//! The crate turns a per-frame frequency snapshot and pointer state into a
//! deformed sphere mesh, orbiting particles and a themed colour. Scene,
//! renderer, UI and audio capture live outside; see [`frame::Session`] for
//! the single per-frame entry point.

pub mod audio;
pub mod chromatics;
pub mod config;
pub mod core;
pub mod deform;
pub mod error;
pub mod events;
pub mod frame;
pub mod hotspot;
pub mod mesh;
pub mod particles;
pub mod physics;
pub mod ripple;

pub use audio::{AudioAnalyzer, BandEnergies, BeatEvent, BeatState};
pub use chromatics::{ChromaticEngine, ChromaticFrame, Palette, Theme};
pub use config::VisualizerConfig;
pub use crate::core::SimplexNoise;
pub use deform::{Compositor, DeformContext};
pub use error::{MusyncError, Result};
pub use frame::{FrameOutput, Session};
pub use hotspot::{Hotspot, HotspotField};
pub use mesh::SphereMesh;
pub use particles::{ParticleDrive, ParticleField};
pub use physics::PointerPhysics;
pub use ripple::{Ripple, RippleField};
