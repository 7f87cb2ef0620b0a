//! Copy Bird - a Flappy Bird style arcade game for the browser
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, scoring, day/night)
//! - `renderer`: Scene geometry and the WebGPU pipeline that draws it
//! - `ui`: Text overlays shown per game phase
//! - `game`: Update-then-render driver shared by the web and native hosts
//! - `persistence`: Key-value storage for the two persisted preferences
//! - `platform`: Browser input translation
//! - `tuning`: Data-driven game balance

pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use game::{Frame, Game};
pub use highscores::HighScore;
pub use settings::{BirdTheme, Settings};
pub use tuning::Tuning;

use glam::Vec3;

/// Game configuration constants that are not gameplay balance
pub mod consts {
    use glam::Vec3;

    /// Sky top color by day (RGB, 0-255 channels)
    pub const DAY_COLOR: Vec3 = Vec3::new(112.0, 197.0, 206.0);
    /// Sky top color by night
    pub const NIGHT_COLOR: Vec3 = Vec3::new(25.0, 25.0, 112.0);
    /// Sky gradient bottom by day (#87CEEB)
    pub const DAY_HORIZON: Vec3 = Vec3::new(135.0, 206.0, 235.0);
    /// Sky gradient bottom by night (#4682B4)
    pub const NIGHT_HORIZON: Vec3 = Vec3::new(70.0, 130.0, 180.0);

    /// Theme button size (pixels)
    pub const THEME_BUTTON_WIDTH: f32 = 150.0;
    pub const THEME_BUTTON_HEIGHT: f32 = 40.0;
    /// Gap between the bird's bottom edge and the theme button
    pub const THEME_BUTTON_GAP: f32 = 20.0;

    /// Grass spike dimensions
    pub const SPIKE_WIDTH: f32 = 10.0;
    pub const SPIKE_HEIGHT: f32 = 25.0;

    /// Pipe cap height and overhang on each side
    pub const PIPE_CAP_HEIGHT: f32 = 25.0;
    pub const PIPE_CAP_OVERHANG: f32 = 5.0;

    /// Minimum clear space between consecutive pipes beyond the bird's diameter
    pub const PIPE_SPACING_MARGIN: f32 = 20.0;

    /// LocalStorage keys
    pub const HIGH_SCORE_KEY: &str = "copyBirdHighScore";
    pub const THEME_INDEX_KEY: &str = "copyBirdThemeIndex";
}

/// Convert a 0-255 RGB triple to a normalized RGBA color
#[inline]
pub fn rgba(color: Vec3, alpha: f32) -> [f32; 4] {
    [color.x / 255.0, color.y / 255.0, color.z / 255.0, alpha]
}
