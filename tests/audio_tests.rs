// Host-side tests for band analysis and beat detection.

use musync::audio::{sub_band_smoothing, AudioAnalyzer};
use musync::config::{BandMultipliers, BeatParams};
use musync::core::SUB_BAND_COUNT;

fn loud(a: &mut AudioAnalyzer) {
    let bins = vec![0.9f32; 256];
    for _ in 0..30 {
        a.analyze(Some(bins.as_slice()), &BandMultipliers::default(), &BeatParams::default());
    }
}

#[test]
fn idle_bands_strictly_decrease() {
    let mut a = AudioAnalyzer::new();
    loud(&mut a);
    let mut prev = a.bands.clone();
    for _ in 0..2000 {
        a.analyze(None, &BandMultipliers::default(), &BeatParams::default());
        let cur = &a.bands;
        for (p, c) in [(prev.bass, cur.bass), (prev.mid, cur.mid), (prev.high, cur.high)] {
            if p > 1e-6 {
                assert!(c < p);
            }
        }
        for i in 0..SUB_BAND_COUNT {
            if prev.sub_bands[i] > 1e-6 {
                assert!(cur.sub_bands[i] < prev.sub_bands[i]);
            }
        }
        assert!(!a.beat.detected);
        prev = cur.clone();
    }
    assert!(a.bands.bass < 1e-6 && a.bands.mid < 1e-6 && a.bands.high < 1e-6);
}

#[test]
fn empty_and_non_finite_snapshots_are_idle() {
    let mut a = AudioAnalyzer::new();
    loud(&mut a);
    let before = a.bands.bass;
    let empty: [f32; 0] = [];
    a.analyze(Some(&empty[..]), &BandMultipliers::default(), &BeatParams::default());
    assert!((a.bands.bass - before * 0.95).abs() < 1e-6);

    let mut bins = vec![0.5f32; 64];
    bins[3] = f32::NAN;
    let before = a.bands.bass;
    assert!(a
        .analyze(Some(bins.as_slice()), &BandMultipliers::default(), &BeatParams::default())
        .is_none());
    assert!(a.bands.bass < before);
}

#[test]
fn beat_intensity_never_exceeds_cap() {
    let mut a = AudioAnalyzer::new();
    let params = BeatParams {
        sensitivity: 10.0,
        ..BeatParams::default()
    };
    let full = vec![1.0f32; 128];
    let silent = vec![0.0f32; 128];
    for i in 0..500 {
        let snap = if i % 2 == 0 { &full } else { &silent };
        a.analyze(Some(snap.as_slice()), &BandMultipliers::default(), &params);
        assert!(a.beat.intensity <= 1.5);
        assert!(a.beat.intensity >= 0.0);
    }
}

#[test]
fn sub_band_smoothing_increases_with_index() {
    for i in 0..SUB_BAND_COUNT - 1 {
        assert!(sub_band_smoothing(i) < sub_band_smoothing(i + 1));
    }
}

#[test]
fn zero_snapshot_drains_bands() {
    let mut a = AudioAnalyzer::new();
    loud(&mut a);
    let zeros = vec![0.0f32; 256];
    for _ in 0..100 {
        a.analyze(Some(zeros.as_slice()), &BandMultipliers::default(), &BeatParams::default());
    }
    assert!(a.bands.bass < 0.01);
    assert!(a.bands.mid < 0.01);
    assert!(a.bands.high < 0.01);
}

#[test]
fn negative_sensitivity_floors_intensity_at_zero() {
    let mut a = AudioAnalyzer::new();
    let params = BeatParams {
        sensitivity: -5.0,
        ..BeatParams::default()
    };
    let full = vec![1.0f32; 256];
    let ev = a.analyze(Some(full.as_slice()), &BandMultipliers::default(), &params);
    assert!(ev.is_some());
    assert_eq!(a.beat.intensity, 0.0);
}

#[test]
fn full_snapshot_from_rest_is_a_beat() {
    let mut a = AudioAnalyzer::new();
    let full = vec![1.0f32; 256];
    let ev = a.analyze(Some(full.as_slice()), &BandMultipliers::default(), &BeatParams::default());
    assert!(a.beat.detected);
    let ev = ev.expect("beat event");
    assert!((ev.energy_delta - 1.0).abs() < 1e-6);
    assert!(a.beat.intensity > 0.0 && a.beat.intensity <= 1.5);
}

#[test]
fn sustained_loudness_is_not_a_beat() {
    let mut a = AudioAnalyzer::new();
    let full = vec![1.0f32; 256];
    a.analyze(Some(full.as_slice()), &BandMultipliers::default(), &BeatParams::default());
    let again = a.analyze(Some(full.as_slice()), &BandMultipliers::default(), &BeatParams::default());
    assert!(again.is_none());
    assert!(!a.beat.detected);
}
