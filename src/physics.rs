use crate::config::PhysicsParams;
use crate::core::constants::{
    BOUNCE_WOBBLE_GAIN, DRAG_TARGET_SCALE, WOBBLE_SPEED_CAP, WOBBLE_SPEED_GAIN,
    WOBBLE_SPEED_THRESHOLD,
};
use glam::Vec2;

/// Rigid offset of the blob under pointer drag, as a spring-mass-damper.
///
/// Forces are applied per tick, not per second; only the wobble phase is
/// advanced with `dt`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointerPhysics {
    pub position: Vec2,
    pub velocity: Vec2,
    pub wobble_intensity: f32,
    pub wobble_phase: f32,
}

impl PointerPhysics {
    pub fn new() -> Self {
        Self::default()
    }

    /// One integration step. `pointer` is in normalised device coordinates.
    pub fn update(&mut self, dragging: bool, pointer: Vec2, dt: f32, params: &PhysicsParams) {
        let force = if dragging {
            let target = pointer * DRAG_TARGET_SCALE;
            (target - self.position) * params.spring_strength * 2.0
        } else {
            -self.position * params.spring_strength
        };

        self.velocity += force;
        self.velocity *= params.damping;
        self.position += self.velocity;

        let limit = params.max_displacement;
        self.bounce_axis(0, limit, params.bounce_elasticity);
        self.bounce_axis(1, limit, params.bounce_elasticity);

        self.wobble_phase += dt * params.wobble_frequency;
        self.wobble_intensity *= params.wobble_decay;

        let speed = self.velocity.length();
        if speed > WOBBLE_SPEED_THRESHOLD {
            self.wobble_intensity =
                (self.wobble_intensity + speed * WOBBLE_SPEED_GAIN).min(WOBBLE_SPEED_CAP);
        }
    }

    fn bounce_axis(&mut self, axis: usize, limit: f32, elasticity: f32) {
        let p = self.position[axis];
        if p.abs() <= limit {
            return;
        }
        self.position[axis] = limit.copysign(p);
        self.velocity[axis] *= -elasticity;
        self.wobble_intensity += self.velocity[axis].abs() * BOUNCE_WOBBLE_GAIN;
        log::trace!("[physics] bounce axis={} v={:.3}", axis, self.velocity[axis]);
    }

    /// Global wobble scalar fed to the compositor.
    #[inline]
    pub fn wobble(&self) -> f32 {
        self.wobble_intensity * self.wobble_phase.sin()
    }

    pub fn add_wobble(&mut self, amount: f32) {
        self.wobble_intensity += amount;
    }

    /// Back to the centre at rest. The wobble phase keeps running.
    pub fn reset(&mut self) {
        self.position = Vec2::ZERO;
        self.velocity = Vec2::ZERO;
        self.wobble_intensity = 0.0;
    }
}
