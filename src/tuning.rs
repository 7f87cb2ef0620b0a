//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`]. The defaults are the canonical
//! set; alternatives can be loaded from JSON and are validated before use.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::PIPE_SPACING_MARGIN;

/// Why a tuning set was rejected
#[derive(Debug, Clone, PartialEq)]
pub enum TuningError {
    /// JSON could not be parsed
    Parse(String),
    /// A value is outside its allowed range
    OutOfRange { field: &'static str, value: f32 },
    /// Consecutive pipes would be too close for the bird to fit between them
    PipesTooClose { spacing: f32, required: f32 },
    /// Gap-top fractions are not ordered inside (0, 1)
    GapBounds { min: f32, max: f32 },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(msg) => write!(f, "invalid tuning JSON: {msg}"),
            TuningError::OutOfRange { field, value } => {
                write!(f, "tuning field `{field}` out of range: {value}")
            }
            TuningError::PipesTooClose { spacing, required } => write!(
                f,
                "pipe spacing {spacing:.1}px is below the required {required:.1}px"
            ),
            TuningError::GapBounds { min, max } => {
                write!(f, "gap-top fractions must satisfy 0 < {min} <= {max} < 1")
            }
        }
    }
}

impl std::error::Error for TuningError {}

/// Gameplay constants. Distances are pixels, rates are per tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Bird ===
    /// Downward acceleration added to velocity every tick
    pub gravity: f32,
    /// Velocity set by a flap (negative = up)
    pub lift: f32,
    pub bird_radius: f32,
    /// Bird x as a fraction of play width
    pub bird_x_fraction: f32,
    /// Rotation while rising (radians)
    pub flap_tilt: f32,
    /// Maximum downward rotation (radians)
    pub max_tilt: f32,
    /// Rotation added per tick while falling
    pub tilt_step: f32,

    // === Pipes ===
    pub pipe_width: f32,
    pub pipe_gap: f32,
    /// Ticks between pipe spawns
    pub pipe_frequency: u64,
    /// Horizontal pipe movement per tick
    pub scroll_speed: f32,
    /// Gap-top range as fractions of play height
    pub gap_top_min_fraction: f32,
    pub gap_top_max_fraction: f32,

    // === Ground ===
    /// Ground height as a fraction of play height
    pub ground_fraction: f32,
    /// Grass scroll per tick
    pub grass_speed: f32,

    // === Day/night ===
    /// Exponential easing factor toward the target sky color
    pub color_ease_rate: f32,
    /// Score interval between day/night flips
    pub cycle_step: u32,

    // === Scenery ===
    pub cloud_count: usize,
    pub star_count: usize,
    pub cloud_min_speed: f32,
    pub cloud_max_speed: f32,
    pub star_drift: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.15,
            lift: -5.0,
            bird_radius: 20.0,
            bird_x_fraction: 0.25,
            flap_tilt: -std::f32::consts::FRAC_PI_6,
            max_tilt: std::f32::consts::FRAC_PI_2,
            tilt_step: 0.1,

            pipe_width: 65.0,
            pipe_gap: 240.0,
            pipe_frequency: 120,
            scroll_speed: 1.5,
            gap_top_min_fraction: 0.1,
            gap_top_max_fraction: 0.4,

            ground_fraction: 0.1,
            grass_speed: 0.5,

            color_ease_rate: 0.002,
            cycle_step: 10,

            cloud_count: 10,
            star_count: 100,
            cloud_min_speed: 0.05,
            cloud_max_speed: 0.15,
            star_drift: 0.1,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning =
            serde_json::from_str(json).map_err(|e| TuningError::Parse(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Horizontal distance between the trailing edge of one pipe and the
    /// leading edge of the next
    pub fn pipe_spacing(&self) -> f32 {
        self.pipe_frequency as f32 * self.scroll_speed - self.pipe_width
    }

    /// Check the invariants the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("gravity", self.gravity),
            ("bird_radius", self.bird_radius),
            ("pipe_width", self.pipe_width),
            ("pipe_gap", self.pipe_gap),
            ("scroll_speed", self.scroll_speed),
            ("tilt_step", self.tilt_step),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(TuningError::OutOfRange { field, value });
            }
        }
        if !(self.lift < 0.0) {
            return Err(TuningError::OutOfRange {
                field: "lift",
                value: self.lift,
            });
        }
        if !(self.color_ease_rate > 0.0 && self.color_ease_rate < 1.0) {
            return Err(TuningError::OutOfRange {
                field: "color_ease_rate",
                value: self.color_ease_rate,
            });
        }
        if !(self.ground_fraction >= 0.0 && self.ground_fraction < 1.0) {
            return Err(TuningError::OutOfRange {
                field: "ground_fraction",
                value: self.ground_fraction,
            });
        }
        if self.pipe_frequency == 0 {
            return Err(TuningError::OutOfRange {
                field: "pipe_frequency",
                value: 0.0,
            });
        }
        if self.cycle_step == 0 {
            return Err(TuningError::OutOfRange {
                field: "cycle_step",
                value: 0.0,
            });
        }
        if !(self.cloud_min_speed >= 0.0 && self.cloud_min_speed < self.cloud_max_speed) {
            return Err(TuningError::OutOfRange {
                field: "cloud_min_speed",
                value: self.cloud_min_speed,
            });
        }

        let (min, max) = (self.gap_top_min_fraction, self.gap_top_max_fraction);
        if !(min > 0.0 && min <= max && max < 1.0) {
            return Err(TuningError::GapBounds { min, max });
        }

        let required = 2.0 * self.bird_radius + PIPE_SPACING_MARGIN;
        let spacing = self.pipe_spacing();
        if spacing < required {
            return Err(TuningError::PipesTooClose { spacing, required });
        }

        Ok(())
    }
}
