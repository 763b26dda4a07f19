use crate::config::ParticleParams;
use crate::core::constants::{EPSILON, PARTICLE_SHELL_MIN, PARTICLE_SHELL_SPAN};
use crate::hotspot::random_unit_vector;
use glam::{Vec2, Vec3};
use rand::prelude::*;

/// Per-tick inputs that push the particle shell around.
#[derive(Clone, Copy, Debug, Default)]
pub struct ParticleDrive {
    pub time: f32,
    pub bass: f32,
    pub beat_intensity: f32,
    pub drag_velocity: Vec2,
}

/// A shell of points orbiting the blob.
///
/// Each particle springs back toward its rest orbit position, which slowly
/// rotates about the Y axis, while bass and beats push it outward.
pub struct ParticleField {
    positions: Vec<Vec3>,
    velocities: Vec<Vec3>,
    rest: Vec<Vec3>,
}

impl ParticleField {
    pub fn new(params: &ParticleParams, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let rest: Vec<Vec3> = (0..params.count)
            .map(|_| {
                let radius =
                    params.orbit_radius * (PARTICLE_SHELL_MIN + rng.gen::<f32>() * PARTICLE_SHELL_SPAN);
                random_unit_vector(&mut rng) * radius
            })
            .collect();
        Self {
            positions: rest.clone(),
            velocities: vec![Vec3::ZERO; rest.len()],
            rest,
        }
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn rest_positions(&self) -> &[Vec3] {
        &self.rest
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Orbit angle at `time`: steady rotation with a slow sinusoidal ease.
    #[inline]
    pub fn orbit_angle(time: f32, orbit_speed: f32) -> f32 {
        time * orbit_speed + (time * 0.3).sin() * 0.2
    }

    pub fn tick(&mut self, drive: &ParticleDrive, params: &ParticleParams) -> &[Vec3] {
        let repulsion = drive.bass * params.repulsion_force + drive.beat_intensity * params.beat_repulsion;
        let push = drive.drag_velocity * 0.5 * 0.02;
        let angle = Self::orbit_angle(drive.time, params.orbit_speed);
        let (sin_a, cos_a) = angle.sin_cos();

        for ((pos, vel), rest) in self
            .positions
            .iter_mut()
            .zip(self.velocities.iter_mut())
            .zip(self.rest.iter())
        {
            let target = Vec3::new(
                rest.x * cos_a - rest.z * sin_a,
                rest.y,
                rest.x * sin_a + rest.z * cos_a,
            );
            let outward = *pos / (pos.length() + EPSILON);

            *vel += outward * repulsion * 0.1;
            vel.x += push.x;
            vel.y += push.y;
            *vel += (target - *pos) * params.return_speed;

            // Damping comes after integration.
            *pos += *vel;
            *vel *= params.damping;
        }
        &self.positions
    }
}
