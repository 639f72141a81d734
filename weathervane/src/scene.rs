//! Scene classification and the visual parameters of each scene

use std::time::Duration;

use ratatui::style::Color;

/// Backdrop category derived from a weather description
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SceneKind {
    Rain,
    Cloud,
    ClearOrSunny,
    Default,
}

impl SceneKind {
    /// Classify `description` by case-insensitive substring match.
    ///
    /// Rules are checked in order and the first hit wins, so "light rain,
    /// broken clouds" is `Rain`.
    pub fn classify(description: &str) -> Self {
        let description = description.to_lowercase();
        if description.contains("rain") || description.contains("drizzle") {
            SceneKind::Rain
        } else if description.contains("cloud") {
            SceneKind::Cloud
        } else if description.contains("clear") || description.contains("sun") {
            SceneKind::ClearOrSunny
        } else {
            SceneKind::Default
        }
    }

    pub fn config(self) -> &'static SceneConfig {
        match self {
            SceneKind::Rain => &RAIN,
            SceneKind::Cloud => &CLOUD,
            SceneKind::ClearOrSunny => &CLEAR,
            SceneKind::Default => &DEFAULT,
        }
    }

    pub fn label(self) -> &'static str {
        self.config().name
    }
}

/// Fixed look and motion of one scene
#[derive(Debug, PartialEq)]
pub struct SceneConfig {
    pub kind: SceneKind,
    pub name: &'static str,
    /// Particle glyphs, picked per particle
    pub glyphs: &'static [&'static str],
    pub primary: Color,
    pub secondary: Color,
    pub background: Color,
    /// Particles per hundred cells of surface
    pub density: u16,
    /// Cells travelled per frame, fixed-point in 1/16ths: (columns, rows)
    pub velocity: (i32, i32),
    /// Delay between animation frames
    pub frame_interval: Duration,
}

impl SceneConfig {
    /// Particle count for a surface of the given size, at least one.
    pub fn particle_count(&self, width: u16, height: u16) -> usize {
        let cells = width as usize * height as usize;
        (cells * self.density as usize / 100).max(1)
    }
}

pub static RAIN: SceneConfig = SceneConfig {
    kind: SceneKind::Rain,
    name: "rain",
    glyphs: &["│", "╎", "┆", "'"],
    primary: Color::Rgb(90, 140, 220),
    secondary: Color::Rgb(60, 90, 150),
    background: Color::Rgb(12, 18, 32),
    density: 6,
    velocity: (-4, 24),
    frame_interval: Duration::from_millis(60),
};

pub static CLOUD: SceneConfig = SceneConfig {
    kind: SceneKind::Cloud,
    name: "clouds",
    glyphs: &["░", "▒", "░", "≈"],
    primary: Color::Rgb(150, 155, 170),
    secondary: Color::Rgb(100, 105, 120),
    background: Color::Rgb(24, 26, 34),
    density: 4,
    velocity: (6, 0),
    frame_interval: Duration::from_millis(120),
};

pub static CLEAR: SceneConfig = SceneConfig {
    kind: SceneKind::ClearOrSunny,
    name: "clear",
    glyphs: &["·", "✦", "*", "˙"],
    primary: Color::Rgb(255, 210, 90),
    secondary: Color::Rgb(255, 160, 60),
    background: Color::Rgb(36, 28, 16),
    density: 3,
    velocity: (1, -1),
    frame_interval: Duration::from_millis(150),
};

pub static DEFAULT: SceneConfig = SceneConfig {
    kind: SceneKind::Default,
    name: "ambient",
    glyphs: &["·", ".", "∙"],
    primary: Color::Rgb(80, 180, 190),
    secondary: Color::Rgb(50, 110, 130),
    background: Color::Rgb(14, 22, 28),
    density: 3,
    velocity: (3, 2),
    frame_interval: Duration::from_millis(100),
};
