//! Game driver
//!
//! Owns the session state, the input queue and the preference store. Each
//! [`Game::advance`] is one update-then-render step: drain input, tick the
//! simulation, persist what changed, then build the scene and HUD.

use crate::highscores::HighScore;
use crate::persistence::KeyValueStore;
use crate::renderer::{Scene, build_scene};
use crate::settings::Settings;
use crate::sim::{
    GameEvent, GamePhase, GameState, InputEvent, InputQueue, TickOutcome, Viewport, tick,
};
use crate::tuning::Tuning;
use crate::ui::Hud;

/// How far below the gap center the autopilot lets the bird sink
const AUTOPILOT_SLACK: f32 = 20.0;

/// Everything the host needs to present one frame
#[derive(Debug, Clone)]
pub struct Frame {
    pub outcome: TickOutcome,
    pub scene: Scene,
    pub hud: Hud,
}

pub struct Game<S: KeyValueStore> {
    state: GameState,
    input: InputQueue,
    store: S,
    halted: bool,
}

impl<S: KeyValueStore> Game<S> {
    /// Start a session. Preferences are read from `store` once, here.
    pub fn new(store: S, viewport: Viewport, tuning: Tuning, seed: u64) -> Self {
        let tuning = match tuning.validate() {
            Ok(()) => tuning,
            Err(e) => {
                log::warn!("Invalid tuning ({e}), using defaults");
                Tuning::default()
            }
        };
        let high_score = HighScore::load(&store);
        let settings = Settings::load(&store);
        log::info!(
            "Session started ({}x{}, seed {})",
            viewport.width,
            viewport.height,
            seed
        );

        Self {
            state: GameState::new(viewport, tuning, seed, high_score, settings),
            input: InputQueue::new(),
            store,
            halted: false,
        }
    }

    /// Queue an input for the next tick. Returns true if the loop had halted
    /// and the host must schedule a frame again.
    pub fn push_input(&mut self, event: InputEvent) -> bool {
        self.input.push(event);
        std::mem::replace(&mut self.halted, false)
    }

    /// One frame: update, then build what to draw
    pub fn advance(&mut self) -> Frame {
        let outcome = self.step();
        Frame {
            outcome,
            scene: build_scene(&self.state),
            hud: Hud::build(&self.state),
        }
    }

    /// Rebuild the current frame without ticking, e.g. after a resize
    /// while the loop is halted
    pub fn current_frame(&self) -> Frame {
        Frame {
            outcome: if self.halted {
                TickOutcome::Halt
            } else {
                TickOutcome::Continue
            },
            scene: build_scene(&self.state),
            hud: Hud::build(&self.state),
        }
    }

    /// Run `ticks` updates without building scenes. Returns the last outcome.
    pub fn advance_n(&mut self, ticks: u64) -> TickOutcome {
        let mut outcome = TickOutcome::Continue;
        for _ in 0..ticks {
            outcome = self.step();
        }
        outcome
    }

    fn step(&mut self) -> TickOutcome {
        let outcome = tick(&mut self.state, &mut self.input);
        for event in self.state.drain_events() {
            self.persist(event);
        }
        self.halted = outcome == TickOutcome::Halt;
        outcome
    }

    fn persist(&mut self, event: GameEvent) {
        match event {
            GameEvent::NewHighScore(_) => self.state.high_score.save(&mut self.store),
            GameEvent::ThemeChanged(_) => self.state.settings.save(&mut self.store),
            GameEvent::Died { score } => log::info!("Game over with score {}", score),
            GameEvent::Started | GameEvent::Reset => {}
        }
    }

    /// Apply a new surface size. The bird is re-placed on the next reset.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.set_viewport(Viewport::new(width, height));
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

/// Simple bot for headless runs: starts the game, then flaps whenever the
/// bird sinks below the middle of the next gap
pub fn autopilot(state: &GameState) -> Option<InputEvent> {
    match state.phase {
        GamePhase::NotStarted => Some(InputEvent::PrimaryKey),
        GamePhase::Playing => {
            let bird = &state.bird;
            let target = state
                .pipes
                .iter()
                .find(|p| p.right() > bird.left())
                .map(|p| (p.top + p.bottom) / 2.0)
                .unwrap_or(state.ground_y() / 2.0);
            (bird.velocity >= 0.0 && bird.y > target + AUTOPILOT_SLACK)
                .then_some(InputEvent::PrimaryKey)
        }
        GamePhase::Paused | GamePhase::GameOver { .. } => None,
    }
}
