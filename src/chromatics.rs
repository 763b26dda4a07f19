//! Energy-driven colour theming.
//!
//! Themes are a closed set; lookup by key falls back to [`Theme::Void`].

use crate::config::ChromaticParams;
use crate::core::constants::ENERGY_THRESHOLDS;
use glam::Vec3;

/// Decode `0xRRGGBB` into an RGB vector in `[0, 1]`.
#[inline]
pub fn rgb_hex(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    )
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub name: &'static str,
    pub idle: Vec3,
    pub low_energy: Vec3,
    pub high_energy: Vec3,
    pub peak: Vec3,
    pub particle: Vec3,
    pub background: Vec3,
}

impl Palette {
    /// `[idle, low, high, peak, particle, background]` as `0xRRGGBB`.
    fn from_hex(name: &'static str, hex: [u32; 6]) -> Self {
        Self {
            name,
            idle: rgb_hex(hex[0]),
            low_energy: rgb_hex(hex[1]),
            high_energy: rgb_hex(hex[2]),
            peak: rgb_hex(hex[3]),
            particle: rgb_hex(hex[4]),
            background: rgb_hex(hex[5]),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    #[default]
    Void,
    Gold,
    Cyber,
    Bio,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Void, Theme::Gold, Theme::Cyber, Theme::Bio];

    pub fn palette(self) -> Palette {
        match self {
            // deep purple -> crimson -> electric cyan
            Theme::Void => Palette::from_hex(
                "Void",
                [0x0a0a0a, 0x1a0a2e, 0x8b0000, 0x00ffff, 0x4a0080, 0xffffff],
            ),
            // bronze -> gold -> white hot
            Theme::Gold => Palette::from_hex(
                "Liquid Gold",
                [0x1a1a0a, 0x8b6914, 0xffd700, 0xffffff, 0xdaa520, 0xfaf8f0],
            ),
            Theme::Cyber => Palette::from_hex(
                "Cyberpunk",
                [0x0a0a1a, 0xff00ff, 0x00ffff, 0xffff00, 0xff1493, 0x0a0a0f],
            ),
            Theme::Bio => Palette::from_hex(
                "Bioluminescence",
                [0x001a0a, 0x004d40, 0x00ff88, 0x00ffcc, 0x00aa55, 0x0a1a1a],
            ),
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Theme::Void => "void",
            Theme::Gold => "gold",
            Theme::Cyber => "cyber",
            Theme::Bio => "bio",
        }
    }

    pub fn from_key(key: &str) -> Option<Theme> {
        Theme::ALL
            .into_iter()
            .find(|t| t.key().eq_ignore_ascii_case(key.trim()))
    }

    pub fn from_key_or_default(key: &str) -> Theme {
        Theme::from_key(key).unwrap_or_else(|| {
            log::warn!("[theme] unknown theme '{}', using {}", key, Theme::default().key());
            Theme::default()
        })
    }
}

/// Displayed colours for one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChromaticFrame {
    pub color: Vec3,
    pub emissive: Vec3,
    pub emissive_intensity: f32,
}

/// Combined energy that selects the target colour.
#[inline]
pub fn combined_energy(bass: f32, mid: f32, beat_intensity: f32) -> f32 {
    bass * 0.5 + mid * 0.3 + beat_intensity * 0.5
}

pub struct ChromaticEngine {
    theme: Theme,
    current: Vec3,
    target: Vec3,
    emissive: Vec3,
    emissive_intensity: f32,
    particle_color: Vec3,
}

impl ChromaticEngine {
    pub fn new(theme: Theme) -> Self {
        let p = theme.palette();
        Self {
            theme,
            current: p.idle,
            target: p.idle,
            emissive: Vec3::ZERO,
            emissive_intensity: 0.0,
            particle_color: p.particle,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn current_color(&self) -> Vec3 {
        self.current
    }

    pub fn target_color(&self) -> Vec3 {
        self.target
    }

    pub fn particle_color(&self) -> Vec3 {
        self.particle_color
    }

    pub fn background_color(&self) -> Vec3 {
        self.theme.palette().background
    }

    pub fn frame(&self) -> ChromaticFrame {
        ChromaticFrame {
            color: self.current,
            emissive: self.emissive,
            emissive_intensity: self.emissive_intensity,
        }
    }

    /// Palette entry for `energy`: idle, low, high or peak.
    pub fn target_for(&self, energy: f32) -> Vec3 {
        let p = self.theme.palette();
        let [idle_max, low_max, high_max] = ENERGY_THRESHOLDS;
        if energy < idle_max {
            p.idle
        } else if energy < low_max {
            p.low_energy
        } else if energy < high_max {
            p.high_energy
        } else {
            p.peak
        }
    }

    /// Ease the displayed colour toward the energy target. Never snaps.
    pub fn tick(
        &mut self,
        bass: f32,
        mid: f32,
        beat_intensity: f32,
        params: &ChromaticParams,
    ) -> ChromaticFrame {
        self.target = self.target_for(combined_energy(bass, mid, beat_intensity));
        self.current += (self.target - self.current) * params.transition_speed;
        self.emissive_intensity = beat_intensity * params.emissive_intensity;
        self.emissive = self.current * self.emissive_intensity;
        self.frame()
    }

    /// Particles drift toward the body colour.
    pub fn ease_particles(&mut self, amount: f32) {
        self.particle_color = self.particle_color.lerp(self.current, amount);
    }

    /// Explicit theme switch: colours jump straight to the new idle colour.
    pub fn apply_theme(&mut self, theme: Theme) {
        let p = theme.palette();
        self.theme = theme;
        self.current = p.idle;
        self.target = p.idle;
        self.particle_color = p.particle;
        log::info!("[theme] {}", p.name);
    }
}
