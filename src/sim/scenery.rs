//! Background clouds and stars
//!
//! Purely decorative. Both drift left while a run is active and wrap to the
//! right edge with a fresh height when they leave the screen.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::Viewport;
use crate::tuning::Tuning;

/// One ellipse of a cloud, positioned relative to the cloud center
#[derive(Debug, Clone, PartialEq)]
pub struct CloudPart {
    pub offset: Vec2,
    pub radius_x: f32,
    pub radius_y: f32,
    pub opacity: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cloud {
    pub pos: Vec2,
    pub speed: f32,
    pub parts: Vec<CloudPart>,
}

impl Cloud {
    fn generate(viewport: Viewport, tuning: &Tuning, rng: &mut Pcg32) -> Self {
        let num_parts = rng.random_range(4..=8);
        let parts = (0..num_parts)
            .map(|_| CloudPart {
                offset: Vec2::new(
                    rng.random_range(-40.0..40.0),
                    rng.random_range(-15.0..15.0),
                ),
                radius_x: rng.random_range(20.0..60.0),
                radius_y: rng.random_range(10.0..30.0),
                opacity: rng.random_range(0.3..0.8),
            })
            .collect();
        Self {
            pos: Vec2::new(
                rng.random_range(0.0..viewport.width),
                rng.random_range(0.0..viewport.height * 0.5),
            ),
            speed: rng.random_range(tuning.cloud_min_speed..tuning.cloud_max_speed),
            parts,
        }
    }

    /// Furthest right any part reaches, relative to the cloud center
    pub fn extent(&self) -> f32 {
        self.parts
            .iter()
            .map(|p| p.offset.x + p.radius_x)
            .fold(0.0, f32::max)
    }

    /// Drift left; once fully off the left edge, re-enter from the right
    pub fn drift(&mut self, viewport: Viewport, rng: &mut Pcg32) {
        self.pos.x -= self.speed;
        let extent = self.extent();
        if self.pos.x + extent < 0.0 {
            self.pos.x = viewport.width + extent;
            self.pos.y = rng.random_range(0.0..viewport.height * 0.5);
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
}

impl Star {
    fn generate(viewport: Viewport, rng: &mut Pcg32) -> Self {
        Self {
            pos: Vec2::new(
                rng.random_range(0.0..viewport.width),
                rng.random_range(0.0..viewport.height),
            ),
            size: rng.random_range(1.0..3.0),
        }
    }

    pub fn drift(&mut self, speed: f32, viewport: Viewport, rng: &mut Pcg32) {
        self.pos.x -= speed;
        if self.pos.x < 0.0 {
            self.pos.x = viewport.width;
            self.pos.y = rng.random_range(0.0..viewport.height);
        }
    }

    /// Twinkling radius for a given frame
    pub fn twinkle_radius(&self, frame: u64) -> f32 {
        let phase = frame as f32 / 10.0 + self.pos.x;
        self.size * (phase.sin() * 0.5 + 0.5)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scenery {
    pub clouds: Vec<Cloud>,
    pub stars: Vec<Star>,
}

impl Scenery {
    /// Scatter clouds over the upper half and stars over the whole surface
    pub fn generate(viewport: Viewport, tuning: &Tuning, rng: &mut Pcg32) -> Self {
        let clouds = (0..tuning.cloud_count)
            .map(|_| Cloud::generate(viewport, tuning, rng))
            .collect();
        let stars = (0..tuning.star_count)
            .map(|_| Star::generate(viewport, rng))
            .collect();
        Self { clouds, stars }
    }

    /// Advance every particle by one tick
    pub fn drift(&mut self, viewport: Viewport, tuning: &Tuning, rng: &mut Pcg32) {
        for cloud in &mut self.clouds {
            cloud.drift(viewport, rng);
        }
        for star in &mut self.stars {
            star.drift(tuning.star_drift, viewport, rng);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn viewport() -> Viewport {
        Viewport::new(800.0, 600.0)
    }

    #[test]
    fn test_generate_bounds() {
        let mut rng = Pcg32::seed_from_u64(1);
        let scenery = Scenery::generate(viewport(), &Tuning::default(), &mut rng);
        assert_eq!(scenery.clouds.len(), 10);
        assert_eq!(scenery.stars.len(), 100);
        for cloud in &scenery.clouds {
            assert!((4..=8).contains(&cloud.parts.len()));
            assert!(cloud.pos.y >= 0.0 && cloud.pos.y < 300.0);
            assert!(cloud.speed >= 0.05 && cloud.speed < 0.15);
        }
        for star in &scenery.stars {
            assert!(star.size >= 1.0 && star.size < 3.0);
            assert!(star.pos.x >= 0.0 && star.pos.x < 800.0);
        }
    }

    #[test]
    fn test_cloud_wraps_with_new_height() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut cloud = Cloud {
            pos: Vec2::new(-50.0, 100.0),
            speed: 0.1,
            parts: vec![CloudPart {
                offset: Vec2::new(10.0, 0.0),
                radius_x: 40.0,
                radius_y: 20.0,
                opacity: 0.5,
            }],
        };
        cloud.drift(viewport(), &mut rng);
        assert_eq!(cloud.pos.x, 850.0);
        assert!(cloud.pos.y >= 0.0 && cloud.pos.y < 300.0);
    }

    #[test]
    fn test_cloud_not_wrapped_while_visible() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut cloud = Cloud {
            pos: Vec2::new(10.0, 100.0),
            speed: 0.1,
            parts: vec![CloudPart {
                offset: Vec2::ZERO,
                radius_x: 30.0,
                radius_y: 20.0,
                opacity: 0.5,
            }],
        };
        cloud.drift(viewport(), &mut rng);
        assert!((cloud.pos.x - 9.9).abs() < 1e-5);
        assert_eq!(cloud.pos.y, 100.0);
    }

    #[test]
    fn test_star_wraps() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut star = Star {
            pos: Vec2::new(0.05, 10.0),
            size: 2.0,
        };
        star.drift(0.1, viewport(), &mut rng);
        assert_eq!(star.pos.x, 800.0);
    }

    #[test]
    fn test_twinkle_bounded() {
        let star = Star {
            pos: Vec2::new(123.0, 10.0),
            size: 2.0,
        };
        for frame in 0..200 {
            let r = star.twinkle_radius(frame);
            assert!((0.0..=2.0).contains(&r));
        }
    }
}
