//! Day/night cycle
//!
//! The sky color eases exponentially toward the current phase's constant. Each
//! time the score reaches the next threshold (every `cycle_step` points) the
//! target flips between day and night.

use glam::Vec3;

use crate::consts::{DAY_COLOR, DAY_HORIZON, NIGHT_COLOR, NIGHT_HORIZON};

#[derive(Debug, Clone, PartialEq)]
pub struct SkyCycle {
    /// Displayed sky-top color (0-255 RGB)
    pub current: Vec3,
    /// Color being eased toward
    pub target: Vec3,
    pub is_day: bool,
    /// Score at which the next flip happens
    pub next_threshold: u32,
    step: u32,
}

impl SkyCycle {
    /// Start in full daylight
    pub fn new(step: u32) -> Self {
        Self {
            current: DAY_COLOR,
            target: DAY_COLOR,
            is_day: true,
            next_threshold: step,
            step,
        }
    }

    /// Flip the target phase
    pub fn flip(&mut self) {
        self.target = if self.is_day { NIGHT_COLOR } else { DAY_COLOR };
        self.is_day = !self.is_day;
    }

    /// Flip if `score` has reached the threshold. At most one flip per call.
    pub fn check_score(&mut self, score: u32) -> bool {
        if score < self.next_threshold {
            return false;
        }
        self.flip();
        self.next_threshold += self.step;
        log::debug!(
            "Sky turning to {} at score {} (next at {})",
            if self.is_day { "day" } else { "night" },
            score,
            self.next_threshold
        );
        true
    }

    /// `current += (target - current) * rate`, with rate in (0, 1)
    pub fn ease(&mut self, rate: f32) {
        self.current += (self.target - self.current) * rate;
    }

    /// 0 at full day, 1 at full night, measured on the red channel
    pub fn night_intensity(&self) -> f32 {
        ((self.current.x - DAY_COLOR.x) / (NIGHT_COLOR.x - DAY_COLOR.x)).clamp(0.0, 1.0)
    }

    /// Sky gradient bottom color for the current phase
    pub fn horizon(&self) -> Vec3 {
        if self.is_day { DAY_HORIZON } else { NIGHT_HORIZON }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Distance of `p` from the straight day-night segment, and its parameter
    fn segment_position(p: Vec3) -> (f32, f32) {
        let d = NIGHT_COLOR - DAY_COLOR;
        let t = (p - DAY_COLOR).dot(d) / d.length_squared();
        let closest = DAY_COLOR + d * t;
        ((p - closest).length(), t)
    }

    #[test]
    fn test_thresholds_every_ten() {
        let mut sky = SkyCycle::new(10);
        let mut flips = Vec::new();
        for score in 0..=35 {
            if sky.check_score(score) {
                flips.push(score);
            }
        }
        assert_eq!(flips, vec![10, 20, 30]);
        assert!(!sky.is_day);
        assert_eq!(sky.next_threshold, 40);
    }

    #[test]
    fn test_flip_alternates_target() {
        let mut sky = SkyCycle::new(10);
        sky.flip();
        assert_eq!(sky.target, NIGHT_COLOR);
        assert_eq!(sky.horizon(), NIGHT_HORIZON);
        sky.flip();
        assert_eq!(sky.target, DAY_COLOR);
        assert!(sky.is_day);
    }

    #[test]
    fn test_night_intensity_endpoints() {
        let mut sky = SkyCycle::new(10);
        assert_eq!(sky.night_intensity(), 0.0);
        sky.current = NIGHT_COLOR;
        assert_eq!(sky.night_intensity(), 1.0);
        sky.current = (DAY_COLOR + NIGHT_COLOR) / 2.0;
        assert!((sky.night_intensity() - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_ease_converges_toward_night() {
        let mut sky = SkyCycle::new(10);
        sky.flip();
        let mut last = sky.night_intensity();
        for _ in 0..5000 {
            sky.ease(0.002);
            let now = sky.night_intensity();
            assert!(now >= last);
            last = now;
        }
        assert!(last > 0.99);
    }

    proptest! {
        #[test]
        fn prop_color_stays_on_segment(
            rate in 0.0005f32..0.5,
            flips in proptest::collection::vec(1usize..400, 1..6),
        ) {
            let mut sky = SkyCycle::new(10);
            for ticks in flips {
                sky.flip();
                for _ in 0..ticks {
                    sky.ease(rate);
                    let (off, t) = segment_position(sky.current);
                    prop_assert!(off < 1e-2);
                    prop_assert!(t >= -1e-4 && t <= 1.0 + 1e-4);
                }
            }
        }
    }
}
