//! Frequency snapshot analysis: band energies, sub-bands and beat tracking.
//!
//! The analyzer never owns an audio source. Each tick it is handed a
//! snapshot of normalised bin magnitudes (or nothing) and updates its
//! smoothed state in place. No data is the normal idle path: everything
//! decays so the blob relaxes instead of freezing.

use crate::config::{BandMultipliers, BeatParams};
use crate::core::constants::*;

/// Smoothed loudness per frequency range. Values are `>= 0` and decay
/// toward zero without input.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BandEnergies {
    pub bass: f32,
    pub mid: f32,
    pub high: f32,
    pub sub_bands: [f32; SUB_BAND_COUNT],
}

/// Energy-delta beat tracker.
///
/// `intensity` is clamped to [`BEAT_INTENSITY_MAX`] and decays every tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BeatState {
    pub energy: f32,
    pub prev_energy: f32,
    pub detected: bool,
    pub intensity: f32,
}

/// Emitted on the tick a beat is detected, so the caller can apply its
/// spike / ripple / wobble policy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BeatEvent {
    pub energy_delta: f32,
    pub intensity: f32,
}

/// One-pole smoothing factor of sub-band `index`. Higher bands track
/// their target more closely.
#[inline]
pub fn sub_band_smoothing(index: usize) -> f32 {
    SUB_BAND_SMOOTHING_BASE + index as f32 * SUB_BAND_SMOOTHING_STEP
}

#[inline]
fn smooth_toward(value: &mut f32, target: f32, factor: f32) {
    *value += (target - *value) * factor;
}

/// Bin ranges of one snapshot: `[0, bass_end)`, `[bass_end, mid_end)`,
/// `[mid_end, len)` plus the sub-band width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BandLayout {
    pub bass_end: usize,
    pub mid_end: usize,
    pub len: usize,
    pub sub_band_width: usize,
}

impl BandLayout {
    pub fn for_bins(len: usize) -> Self {
        let bass_end = (len as f32 * BASS_END_FRACTION).floor() as usize;
        let mid_end = (len as f32 * MID_END_FRACTION).floor() as usize;
        Self {
            bass_end,
            mid_end: mid_end.max(bass_end),
            len,
            sub_band_width: len / SUB_BAND_COUNT,
        }
    }

    #[inline]
    fn sub_band_of(&self, bin: usize) -> usize {
        (bin / self.sub_band_width.max(1)).min(SUB_BAND_COUNT - 1)
    }
}

#[derive(Clone, Debug, Default)]
pub struct AudioAnalyzer {
    pub bands: BandEnergies,
    pub beat: BeatState,
}

impl AudioAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one tick. `None`, empty and non-finite snapshots all take
    /// the idle decay path. Returns the beat event if one fired this tick.
    pub fn analyze(
        &mut self,
        snapshot: Option<&[f32]>,
        multipliers: &BandMultipliers,
        beat_params: &BeatParams,
    ) -> Option<BeatEvent> {
        match snapshot.filter(|s| usable(s)) {
            Some(bins) => self.analyze_bins(bins, multipliers, beat_params),
            None => {
                self.decay_idle();
                None
            }
        }
    }

    fn decay_idle(&mut self) {
        let b = &mut self.bands;
        b.bass *= IDLE_BAND_RETENTION;
        b.mid *= IDLE_BAND_RETENTION;
        b.high *= IDLE_BAND_RETENTION;
        for s in b.sub_bands.iter_mut() {
            *s *= IDLE_SUB_BAND_RETENTION;
        }
        self.beat.intensity *= IDLE_BEAT_RETENTION;
        self.beat.energy *= IDLE_BAND_RETENTION;
        self.beat.prev_energy = self.beat.energy;
        self.beat.detected = false;
    }

    fn analyze_bins(
        &mut self,
        bins: &[f32],
        multipliers: &BandMultipliers,
        beat_params: &BeatParams,
    ) -> Option<BeatEvent> {
        let layout = BandLayout::for_bins(bins.len());
        let mut bass_sum = 0.0f32;
        let mut mid_sum = 0.0f32;
        let mut high_sum = 0.0f32;
        let mut total = 0.0f32;
        let mut sub_sums = [0.0f32; SUB_BAND_COUNT];

        for (i, &raw) in bins.iter().enumerate() {
            let v = raw.clamp(0.0, 1.0);
            total += v;
            if i < layout.bass_end {
                bass_sum += v;
            } else if i < layout.mid_end {
                mid_sum += v;
            } else {
                high_sum += v;
            }
            sub_sums[layout.sub_band_of(i)] += v;
        }

        let width = |n: usize| n.max(1) as f32;
        let target_bass = bass_sum / width(layout.bass_end) * multipliers.bass;
        let target_mid = mid_sum / width(layout.mid_end - layout.bass_end) * multipliers.mid;
        let target_high = high_sum / width(layout.len - layout.mid_end) * multipliers.high;

        let b = &mut self.bands;
        smooth_toward(&mut b.bass, target_bass, BASS_SMOOTHING);
        smooth_toward(&mut b.mid, target_mid, MID_SMOOTHING);
        smooth_toward(&mut b.high, target_high, HIGH_SMOOTHING);
        for (i, band) in b.sub_bands.iter_mut().enumerate() {
            let target = sub_sums[i] / width(layout.sub_band_width) * multipliers.sub_band;
            smooth_toward(band, target, sub_band_smoothing(i));
        }

        let event = self.detect_beat(total / bins.len() as f32, beat_params);
        self.beat.intensity *= beat_params.decay_rate;
        event
    }

    fn detect_beat(&mut self, energy: f32, params: &BeatParams) -> Option<BeatEvent> {
        let beat = &mut self.beat;
        beat.prev_energy = beat.energy;
        beat.energy = energy;

        let delta = beat.energy - beat.prev_energy;
        // Quiet passages get a higher threshold than loud sustained ones.
        let threshold = params.threshold * (1.0 - beat.energy * BEAT_THRESHOLD_SLOPE);
        beat.detected = delta > threshold && beat.energy > BEAT_MIN_ENERGY;
        if !beat.detected {
            return None;
        }

        beat.intensity =
            (beat.intensity + delta * params.sensitivity).clamp(0.0, BEAT_INTENSITY_MAX);
        log::debug!(
            "[beat] delta={:.3} energy={:.3} intensity={:.3}",
            delta,
            beat.energy,
            beat.intensity
        );
        Some(BeatEvent {
            energy_delta: delta,
            intensity: beat.intensity,
        })
    }
}

fn usable(bins: &[f32]) -> bool {
    if bins.is_empty() {
        return false;
    }
    if bins.iter().any(|v| !v.is_finite()) {
        log::warn!("[audio] dropping snapshot with non-finite bins");
        return false;
    }
    true
}

/// Byte analyser data (`0..=255`) to normalised magnitudes.
pub fn normalize_byte_spectrum(bytes: &[u8]) -> Vec<f32> {
    bytes.iter().map(|b| *b as f32 / 255.0).collect()
}

/// Decibel analyser data (roughly `-100..0` dB) to normalised magnitudes.
pub fn normalize_decibel_spectrum(db: &[f32]) -> Vec<f32> {
    db.iter()
        .map(|v| ((v + 100.0) / 100.0).clamp(0.0, 1.0))
        .collect()
}
