use crate::audio::BandEnergies;
use crate::config::HotspotParams;
use crate::core::constants::*;
use crate::core::SimplexNoise;
use glam::Vec3;
use rand::prelude::*;
use smallvec::SmallVec;
use std::f32::consts::TAU;

/// A fixed surface point that spikes on beats of its assigned sub-band.
#[derive(Clone, Debug, PartialEq)]
pub struct Hotspot {
    pub position: Vec3,
    pub band: usize,
    pub intensity: f32,
    pub phase: f32,
}

/// Uniform point on the unit sphere (`phi = acos(2u - 1)`).
pub fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let theta = rng.gen::<f32>() * TAU;
    let phi = (2.0 * rng.gen::<f32>() - 1.0).clamp(-1.0, 1.0).acos();
    Vec3::new(phi.sin() * theta.cos(), phi.sin() * theta.sin(), phi.cos())
}

pub struct HotspotField {
    hotspots: Vec<Hotspot>,
    rng: StdRng,
}

impl HotspotField {
    /// Place `count` hotspots uniformly on the sphere, bands assigned round-robin.
    pub fn new(count: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let hotspots = (0..count)
            .map(|i| Hotspot {
                position: random_unit_vector(&mut rng),
                band: i % SUB_BAND_COUNT,
                intensity: 0.0,
                phase: rng.gen::<f32>() * TAU,
            })
            .collect();
        Self { hotspots, rng }
    }

    pub fn hotspots(&self) -> &[Hotspot] {
        &self.hotspots
    }

    /// Multiplicative decay, applied every tick.
    pub fn tick(&mut self, params: &HotspotParams) {
        for h in self.hotspots.iter_mut() {
            h.intensity *= params.decay;
        }
    }

    /// Excite 1 to 3 hotspots, picked with replacement. Returns the picks.
    pub fn spike(
        &mut self,
        bands: &BandEnergies,
        params: &HotspotParams,
    ) -> SmallVec<[usize; HOTSPOT_MAX_SPIKES]> {
        let mut picked = SmallVec::new();
        if self.hotspots.is_empty() {
            return picked;
        }
        let count = self.rng.gen_range(1..=HOTSPOT_MAX_SPIKES);
        for _ in 0..count {
            let idx = self.rng.gen_range(0..self.hotspots.len());
            let h = &mut self.hotspots[idx];
            let band_energy = bands.sub_bands[h.band];
            h.intensity = (h.intensity + params.spike_strength * (0.5 + band_energy))
                .clamp(0.0, HOTSPOT_INTENSITY_MAX);
            picked.push(idx);
        }
        log::debug!("[hotspot] spiked {:?}", picked.as_slice());
        picked
    }

    /// Gaussian bumps around active hotspots, roughened by noise.
    pub fn displacement_at(&self, dir: Vec3, time: f32, noise: &SimplexNoise) -> f32 {
        let mut total = 0.0;
        for h in self.hotspots.iter() {
            if h.intensity <= HOTSPOT_ACTIVE_MIN {
                continue;
            }
            let dist_sq = (dir - h.position).length_squared();
            let influence = (-dist_sq * HOTSPOT_FALLOFF).exp();
            let grain = noise.noise3d(dir.x * 3.0 + h.phase, dir.y * 3.0 + time * 0.5, dir.z * 3.0);
            total += h.intensity * influence * (0.5 + grain.abs() * 0.5);
        }
        total
    }

    #[cfg(test)]
    pub(crate) fn set_intensity(&mut self, idx: usize, v: f32) {
        self.hotspots[idx].intensity = v;
    }
}
