use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use glam::Vec2;
use musync::events::client_to_ndc;
use musync::{Session, Theme, VisualizerConfig};

const FRAME_RATE: f32 = 60.0;
const BIN_COUNT: usize = 256;
const WINDOW_SIZE: (f32, f32) = (1280.0, 720.0);

struct Options {
    frames: u64,
    bpm: f32,
    realtime: bool,
}

impl Options {
    fn from_args() -> Result<Self> {
        let mut opts = Options {
            frames: 600,
            bpm: 120.0,
            realtime: false,
        };
        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--frames" => {
                    let v = args.next().context("--frames needs a value")?;
                    opts.frames = v.parse().with_context(|| format!("bad frame count {v:?}"))?;
                }
                "--bpm" => {
                    let v = args.next().context("--bpm needs a value")?;
                    opts.bpm = v.parse().with_context(|| format!("bad bpm {v:?}"))?;
                }
                "--realtime" => opts.realtime = true,
                other => anyhow::bail!("unknown argument {other:?}"),
            }
        }
        anyhow::ensure!(opts.bpm > 0.0, "bpm must be positive");
        Ok(opts)
    }
}

/// Kick on every beat, a wandering mid band and shimmering highs. The last
/// tenth of the run is silent so idle decay shows up in the log.
fn synth_spectrum(t: f32, bpm: f32, out: &mut [f32]) {
    let period = 60.0 / bpm;
    let since_kick = t % period;
    let kick = (-since_kick * 12.0).exp();
    let len = out.len() as f32;
    for (i, bin) in out.iter_mut().enumerate() {
        let f = i as f32 / len;
        let v = if f < 0.08 {
            0.25 + 0.75 * kick
        } else if f < 0.4 {
            0.3 + 0.15 * (t * 2.0 + i as f32 * 0.1).sin()
        } else {
            0.1 + 0.1 * (t * 7.0 + i as f32 * 0.3).sin() * (1.0 - f)
        };
        *bin = v.clamp(0.0, 1.0);
    }
}

// Scripted pointer: hover in, press, drag a quarter circle, release.
fn drive_pointer(session: &mut Session, frame: u64) -> Result<()> {
    let (w, h) = WINDOW_SIZE;
    match frame % 180 {
        30 => {
            session.pointer_enter();
            session.pointer_move(client_to_ndc(w * 0.6, h * 0.4, w, h))?;
        }
        60 => session.pointer_down(),
        61..=89 => {
            let a = (frame % 180 - 60) as f32 / 30.0 * std::f32::consts::FRAC_PI_2;
            let p = Vec2::new(w * (0.5 + 0.2 * a.cos()), h * (0.5 - 0.2 * a.sin()));
            session.pointer_move(client_to_ndc(p.x, p.y, w, h))?;
        }
        90 => session.pointer_up(),
        150 => session.pointer_leave(),
        _ => {}
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let opts = Options::from_args()?;
    let mut session = Session::new(VisualizerConfig::default())?;
    let mut spectrum = vec![0.0f32; BIN_COUNT];
    let dt = 1.0 / FRAME_RATE;
    let silent_from = opts.frames - opts.frames / 10;
    let frame_budget = Duration::from_secs_f32(dt);

    let start = Instant::now();
    let mut tick_time = Duration::ZERO;
    let mut beats = 0u32;

    for frame in 0..opts.frames {
        let t = frame as f32 * dt;
        let snapshot = if frame < silent_from {
            synth_spectrum(t, opts.bpm, &mut spectrum);
            Some(spectrum.as_slice())
        } else {
            None
        };

        drive_pointer(&mut session, frame)?;
        if frame > 0 && frame % 240 == 0 {
            let idx = (frame / 240) as usize % Theme::ALL.len();
            session.apply_theme(Theme::ALL[idx]);
        }

        let before = Instant::now();
        let out = session.tick(dt, snapshot)?;
        tick_time += before.elapsed();

        if out.beat {
            beats += 1;
        }
        let max_radius = out
            .positions
            .iter()
            .map(|p| p.length())
            .fold(0.0f32, f32::max);
        let color = out.chromatic.color;
        let offset = out.mesh_offset;

        if (frame + 1) % FRAME_RATE as u64 == 0 {
            let bands = &session.analyzer().bands;
            log::info!(
                "[native] t={:.1}s beats={} bass={:.2} mid={:.2} high={:.2} ripples={} r_max={:.3} offset=({:.2},{:.2}) color=({:.2},{:.2},{:.2})",
                session.time(),
                beats,
                bands.bass,
                bands.mid,
                bands.high,
                session.ripples().len(),
                max_radius,
                offset.x,
                offset.y,
                color.x,
                color.y,
                color.z
            );
            beats = 0;
        }

        if opts.realtime {
            let elapsed = before.elapsed();
            if elapsed < frame_budget {
                std::thread::sleep(frame_budget - elapsed);
            }
        }
    }

    let ticks = opts.frames.max(1) as u32;
    log::info!(
        "[native] {} frames in {:.2?}, mean tick {:.2?}",
        opts.frames,
        start.elapsed(),
        tick_time / ticks
    );
    Ok(())
}
