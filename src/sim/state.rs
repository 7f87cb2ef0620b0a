//! Game state and core simulation types
//!
//! All session state lives on [`GameState`]; nothing is global. A reset
//! rebuilds the run while keeping the preferences loaded at startup.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::Rect;
use super::scenery::Scenery;
use super::sky::SkyCycle;
use crate::consts::{THEME_BUTTON_GAP, THEME_BUTTON_HEIGHT, THEME_BUTTON_WIDTH};
use crate::highscores::HighScore;
use crate::settings::Settings;
use crate::tuning::Tuning;

/// Play surface size in pixels (origin top-left, y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, waiting for the first flap
    NotStarted,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Run ended; `landed` once the bird has fallen to the ground
    GameOver { landed: bool },
}

impl GamePhase {
    /// True once a run has begun (score is shown from here on)
    pub fn is_started(&self) -> bool {
        !matches!(self, GamePhase::NotStarted)
    }
}

/// Events the host reacts to (persistence, logging)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A run began
    Started,
    /// A run ended; the bird starts its death fall
    Died { score: u32 },
    /// The bird landed after dying and the best score improved
    NewHighScore(u32),
    /// The player picked another bird theme
    ThemeChanged(usize),
    /// The session was reset to the title screen
    Reset,
}

/// The player's bird
#[derive(Debug, Clone, PartialEq)]
pub struct Bird {
    /// Fixed horizontal position
    pub x: f32,
    pub y: f32,
    pub velocity: f32,
    /// Radians, positive tilts the beak down
    pub rotation: f32,
    pub radius: f32,
}

impl Bird {
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        Self {
            x,
            y,
            velocity: 0.0,
            rotation: 0.0,
            radius,
        }
    }

    /// Integrate one tick: velocity first, then position, then tilt
    pub fn apply_gravity(&mut self, tuning: &Tuning) {
        self.velocity += tuning.gravity;
        self.y += self.velocity;
        self.update_rotation(tuning);
    }

    /// Rising snaps to the flap tilt; falling eases toward the max tilt
    pub fn update_rotation(&mut self, tuning: &Tuning) {
        if self.velocity < 0.0 {
            self.rotation = tuning.flap_tilt;
        } else {
            self.rotation = (self.rotation + tuning.tilt_step).min(tuning.max_tilt);
        }
    }

    /// Upward impulse
    pub fn flap(&mut self, tuning: &Tuning) {
        self.velocity = tuning.lift;
        self.rotation = tuning.flap_tilt;
    }

    pub fn top(&self) -> f32 {
        self.y - self.radius
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.radius
    }

    pub fn left(&self) -> f32 {
        self.x - self.radius
    }

    pub fn right(&self) -> f32 {
        self.x + self.radius
    }
}

/// A pipe pair with a gap between its top and bottom segments
#[derive(Debug, Clone, PartialEq)]
pub struct Pipe {
    /// Leading (left) edge
    pub x: f32,
    pub width: f32,
    /// Gap top edge (bottom of the upper segment)
    pub top: f32,
    /// Gap bottom edge (top of the lower segment)
    pub bottom: f32,
    /// Set once the bird has cleared this pipe
    pub passed: bool,
}

impl Pipe {
    /// Spawn at `x` with a gap top sampled uniformly from the tuned range
    pub fn spawn(x: f32, play_height: f32, tuning: &Tuning, rng: &mut Pcg32) -> Self {
        let min_top = play_height * tuning.gap_top_min_fraction;
        let max_top = play_height * tuning.gap_top_max_fraction;
        let top = if max_top > min_top {
            rng.random_range(min_top..=max_top)
        } else {
            min_top
        };
        Self::with_gap(x, top, tuning)
    }

    /// Build a pipe with a known gap top
    pub fn with_gap(x: f32, top: f32, tuning: &Tuning) -> Self {
        Self {
            x,
            width: tuning.pipe_width,
            top,
            bottom: top + tuning.pipe_gap,
            passed: false,
        }
    }

    /// Scroll left by one tick
    pub fn advance(&mut self, speed: f32) {
        self.x -= speed;
    }

    /// Trailing (right) edge
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Whether the trailing edge has moved left of `x`
    pub fn is_behind(&self, x: f32) -> bool {
        self.right() < x
    }

    /// Whether the pipe has fully left the screen
    pub fn is_offscreen(&self) -> bool {
        self.right() < 0.0
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub viewport: Viewport,
    pub phase: GamePhase,
    pub bird: Bird,
    /// Oldest first; new pipes are appended at the right edge
    pub pipes: Vec<Pipe>,
    pub score: u32,
    /// Persisted best score (survives reset)
    pub high_score: HighScore,
    /// Persisted preferences (survive reset)
    pub settings: Settings,
    /// Ticks spent Playing in this run
    pub frame: u64,
    pub sky: SkyCycle,
    pub scenery: Scenery,
    /// Grass strip scroll offset, wraps at the spike width
    pub grass_offset: f32,
    pub(crate) rng: Pcg32,
    /// Events raised since the host last drained them
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new session. Preferences are passed in once and kept across resets.
    pub fn new(
        viewport: Viewport,
        tuning: Tuning,
        seed: u64,
        high_score: HighScore,
        settings: Settings,
    ) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let scenery = Scenery::generate(viewport, &tuning, &mut rng);
        let bird = Self::fresh_bird(viewport, &tuning);
        let sky = SkyCycle::new(tuning.cycle_step);
        Self {
            tuning,
            viewport,
            phase: GamePhase::NotStarted,
            bird,
            pipes: Vec::new(),
            score: 0,
            high_score,
            settings,
            frame: 0,
            sky,
            scenery,
            grass_offset: 0.0,
            rng,
            events: Vec::new(),
        }
    }

    fn fresh_bird(viewport: Viewport, tuning: &Tuning) -> Bird {
        Bird::new(
            viewport.width * tuning.bird_x_fraction,
            viewport.height / 2.0,
            tuning.bird_radius,
        )
    }

    /// Back to the title screen: new bird, no pipes, zero score, day sky,
    /// fresh scenery. High score and theme are untouched.
    pub fn reset(&mut self) {
        self.bird = Self::fresh_bird(self.viewport, &self.tuning);
        self.pipes.clear();
        self.score = 0;
        self.frame = 0;
        self.sky = SkyCycle::new(self.tuning.cycle_step);
        self.scenery = Scenery::generate(self.viewport, &self.tuning, &mut self.rng);
        self.grass_offset = 0.0;
        self.phase = GamePhase::NotStarted;
        self.emit(GameEvent::Reset);
    }

    /// Change the play surface size; bird placement follows on the next reset
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Y coordinate of the ground surface
    pub fn ground_y(&self) -> f32 {
        self.viewport.height * (1.0 - self.tuning.ground_fraction)
    }

    pub fn ground_height(&self) -> f32 {
        self.viewport.height * self.tuning.ground_fraction
    }

    /// The "change color" button, placed under the bird on the title screen
    pub fn theme_button(&self) -> Rect {
        Rect::new(
            self.viewport.width / 2.0 - THEME_BUTTON_WIDTH / 2.0,
            self.bird.bottom() + THEME_BUTTON_GAP,
            THEME_BUTTON_WIDTH,
            THEME_BUTTON_HEIGHT,
        )
    }

    /// Spawn a pipe at the right edge
    pub fn spawn_pipe(&mut self) {
        let pipe = Pipe::spawn(
            self.viewport.width,
            self.viewport.height,
            &self.tuning,
            &mut self.rng,
        );
        log::debug!("Spawned pipe at frame {} (gap top {:.1})", self.frame, pipe.top);
        self.pipes.push(pipe);
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn state() -> GameState {
        GameState::new(
            Viewport::new(800.0, 600.0),
            Tuning::default(),
            7,
            HighScore::new(5),
            Settings::new(3),
        )
    }

    #[test]
    fn test_new_state_layout() {
        let state = state();
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert_eq!(state.bird.x, 200.0);
        assert_eq!(state.bird.y, 300.0);
        assert_eq!(state.bird.velocity, 0.0);
        assert!((state.ground_y() - 540.0).abs() < 1e-3);
        assert_eq!(state.scenery.clouds.len(), 10);
        assert_eq!(state.scenery.stars.len(), 100);
    }

    #[test]
    fn test_flap_from_rest() {
        let tuning = Tuning::default();
        let mut bird = Bird::new(200.0, 300.0, 20.0);
        bird.flap(&tuning);
        assert_eq!(bird.velocity, -5.0);
        assert!((bird.rotation - (-30.0_f32).to_radians()).abs() < 1e-6);
        assert_eq!(bird.y, 300.0);
    }

    #[test]
    fn test_rotation_eases_to_cap() {
        let tuning = Tuning::default();
        let mut bird = Bird::new(0.0, 0.0, 20.0);
        for _ in 0..40 {
            bird.apply_gravity(&tuning);
        }
        assert_eq!(bird.rotation, std::f32::consts::FRAC_PI_2);
    }

    #[test]
    fn test_reset_keeps_preferences() {
        let mut state = state();
        state.score = 12;
        state.frame = 900;
        state.pipes.push(Pipe::with_gap(10.0, 100.0, &state.tuning));
        state.sky.flip();
        state.phase = GamePhase::GameOver { landed: true };
        state.high_score.submit(12);

        state.reset();

        assert_eq!(state.score, 0);
        assert_eq!(state.frame, 0);
        assert!(state.pipes.is_empty());
        assert_eq!(state.sky, SkyCycle::new(10));
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert_eq!(state.high_score.best, 12);
        assert_eq!(state.settings.theme_index, 3);
        assert_eq!(state.drain_events(), vec![GameEvent::Reset]);
    }

    #[test]
    fn test_pipe_edges() {
        let tuning = Tuning::default();
        let mut pipe = Pipe::with_gap(100.0, 80.0, &tuning);
        assert_eq!(pipe.right(), 165.0);
        assert!(!pipe.is_behind(165.0));
        assert!(pipe.is_behind(165.5));
        pipe.advance(170.0);
        assert!(pipe.is_offscreen());
    }

    #[test]
    fn test_theme_button_under_bird() {
        let state = state();
        let button = state.theme_button();
        assert_eq!(button.x, 325.0);
        assert_eq!(button.y, 340.0);
        assert_eq!(button.w, 150.0);
        assert_eq!(button.h, 40.0);
    }

    proptest! {
        #[test]
        fn prop_gravity_integration(y in 0.0f32..600.0, v in -10.0f32..10.0) {
            let tuning = Tuning::default();
            let mut bird = Bird::new(200.0, y, 20.0);
            bird.velocity = v;
            bird.apply_gravity(&tuning);
            let expected_v = v + tuning.gravity;
            prop_assert_eq!(bird.velocity, expected_v);
            prop_assert_eq!(bird.y, y + expected_v);
        }

        #[test]
        fn prop_spawned_gap_invariant(seed in any::<u64>(), height in 200.0f32..2000.0) {
            let tuning = Tuning::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            for _ in 0..16 {
                let pipe = Pipe::spawn(800.0, height, &tuning, &mut rng);
                prop_assert!((pipe.bottom - pipe.top - tuning.pipe_gap).abs() < 1e-3);
                prop_assert!(pipe.top >= height * 0.1);
                prop_assert!(pipe.top <= height * 0.4);
                prop_assert!(!pipe.passed);
                prop_assert_eq!(pipe.x, 800.0);
            }
        }
    }
}
