use crate::config::RippleParams;
use crate::core::constants::{EPSILON, RIPPLE_MIN_STRENGTH};
use glam::Vec3;
use std::collections::VecDeque;
use std::f32::consts::TAU;

/// A travelling wavefront centred on a point of the unit sphere.
#[derive(Clone, Debug, PartialEq)]
pub struct Ripple {
    pub center: Vec3,
    pub age: f32,
    pub strength: f32,
    pub max_age: f32,
}

impl Ripple {
    #[inline]
    fn expired(&self) -> bool {
        self.age >= self.max_age || self.strength < RIPPLE_MIN_STRENGTH
    }

    /// Contribution of this ripple at unit-sphere point `dir`.
    #[inline]
    pub fn displacement_at(&self, dir: Vec3, wavelength: f32, amplitude: f32) -> f32 {
        let angle = dir.dot(self.center).clamp(-1.0, 1.0).acos();
        let phase = angle / wavelength - self.age;
        let falloff = (-angle * 2.0).exp() * (-self.age * 0.5).exp();
        (phase * TAU).sin() * self.strength * amplitude * falloff
    }
}

/// Bounded FIFO of active ripples. On overflow the oldest ripple is
/// evicted, regardless of its strength.
#[derive(Clone, Debug, Default)]
pub struct RippleField {
    ripples: VecDeque<Ripple>,
}

impl RippleField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a ripple at `direction` (any length; projected onto the sphere).
    pub fn spawn(&mut self, direction: Vec3, strength: f32, params: &RippleParams) {
        if !params.enabled {
            return;
        }
        let len = direction.length();
        if !len.is_finite() || len < EPSILON {
            log::warn!("[ripple] ignoring degenerate direction {:?}", direction);
            return;
        }
        self.ripples.push_back(Ripple {
            center: direction / len,
            age: 0.0,
            strength,
            max_age: params.max_age,
        });
        while self.ripples.len() > params.max_ripples {
            self.ripples.pop_front();
        }
    }

    pub fn tick(&mut self, dt: f32, params: &RippleParams) {
        for r in self.ripples.iter_mut() {
            r.age += dt * params.speed;
            r.strength *= params.decay;
        }
        self.ripples.retain(|r| !r.expired());
    }

    /// Summed ripple displacement at unit-sphere point `dir`.
    pub fn displacement_at(&self, dir: Vec3, params: &RippleParams) -> f32 {
        self.ripples
            .iter()
            .map(|r| r.displacement_at(dir, params.wavelength, params.amplitude))
            .sum()
    }

    pub fn len(&self) -> usize {
        self.ripples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ripples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ripple> {
        self.ripples.iter()
    }

    pub fn clear(&mut self) {
        self.ripples.clear();
    }
}
