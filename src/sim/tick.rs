//! Per-frame simulation tick
//!
//! One call = one discrete step: drain queued input through the state
//! machine, then advance whatever the current phase animates.

use super::collision::{Fatal, bird_hits_pipe, hits_ceiling, hits_ground};
use super::input::{InputEvent, InputQueue};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::SPIKE_WIDTH;

/// Whether the host should keep scheduling ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    /// The end-of-run overlay is up; nothing changes until the next input
    Halt,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &mut InputQueue) -> TickOutcome {
    for event in input.drain() {
        apply_input(state, event);
    }

    match state.phase {
        GamePhase::Playing => step_playing(state),
        GamePhase::GameOver { landed: false } => step_death_fall(state),
        GamePhase::NotStarted | GamePhase::Paused | GamePhase::GameOver { landed: true } => {}
    }

    if state.phase == (GamePhase::GameOver { landed: true }) {
        TickOutcome::Halt
    } else {
        TickOutcome::Continue
    }
}

/// Route one input event through the state machine
pub fn apply_input(state: &mut GameState, event: InputEvent) {
    let primary = matches!(event, InputEvent::Pointer { .. } | InputEvent::PrimaryKey);

    match state.phase {
        GamePhase::NotStarted => {
            if let Some((x, y)) = event.position() {
                if state.theme_button().contains(x, y) {
                    let index = state.settings.cycle_theme();
                    log::info!("Bird theme -> {}", state.settings.theme().name);
                    state.emit(GameEvent::ThemeChanged(index));
                    return;
                }
            }
            if primary {
                state.phase = GamePhase::Playing;
                state.bird.flap(&state.tuning);
                state.emit(GameEvent::Started);
                log::info!("Run started");
            }
        }
        GamePhase::Playing => match event {
            InputEvent::PauseKey => {
                state.phase = GamePhase::Paused;
                log::info!("Paused at frame {}", state.frame);
            }
            _ => state.bird.flap(&state.tuning),
        },
        GamePhase::Paused => {
            // Any resume input only resumes; it does not also flap
            state.phase = GamePhase::Playing;
            log::info!("Resumed");
        }
        GamePhase::GameOver { landed } => {
            if landed && primary {
                state.reset();
                log::info!("Restarted (high score {})", state.high_score.best);
            }
        }
    }
}

/// Everything that moves during a run, in a fixed order
fn step_playing(state: &mut GameState) {
    state.frame += 1;
    let mut fatal: Option<Fatal> = None;

    // Bird
    state.bird.apply_gravity(&state.tuning);
    if hits_ceiling(&state.bird) {
        state.bird.y = state.bird.radius;
        fatal.get_or_insert(Fatal::Ceiling);
    }
    if hits_ground(&state.bird, state.ground_y()) {
        fatal.get_or_insert(Fatal::Ground);
    }

    // Spawner
    if state.frame % state.tuning.pipe_frequency == 0 {
        state.spawn_pipe();
    }

    // Scroll, collide, score
    for pipe in &mut state.pipes {
        pipe.advance(state.tuning.scroll_speed);
        if bird_hits_pipe(&state.bird, pipe) {
            fatal.get_or_insert(Fatal::Pipe);
        }
        if !pipe.passed && pipe.is_behind(state.bird.x) {
            pipe.passed = true;
            state.score += 1;
            log::debug!("Score {} at frame {}", state.score, state.frame);
        }
    }
    state.pipes.retain(|p| !p.is_offscreen());

    state.grass_offset -= state.tuning.grass_speed;
    if state.grass_offset <= -SPIKE_WIDTH {
        state.grass_offset = 0.0;
    }

    // Day/night
    state.sky.check_score(state.score);
    state.sky.ease(state.tuning.color_ease_rate);

    state
        .scenery
        .drift(state.viewport, &state.tuning, &mut state.rng);

    if let Some(cause) = fatal {
        log::info!("Run over ({:?}) with score {}", cause, state.score);
        state.phase = GamePhase::GameOver { landed: false };
        state.emit(GameEvent::Died { score: state.score });
    }
}

/// Post-death fall. Visual only: no pipes, scoring or scenery.
/// Starts on the tick after the fatal one, so the collision frame is drawn as it happened.
fn step_death_fall(state: &mut GameState) {
    let bird = &mut state.bird;
    // Position first, unlike the in-play integration
    bird.y += bird.velocity;
    bird.velocity += state.tuning.gravity;
    bird.rotation = (bird.rotation + state.tuning.tilt_step).min(state.tuning.max_tilt);

    let ground_y = state.ground_y();
    if hits_ground(&state.bird, ground_y) {
        state.bird.y = ground_y - state.bird.radius;
        state.phase = GamePhase::GameOver { landed: true };
        if state.high_score.submit(state.score) {
            log::info!("New high score: {}", state.score);
            state.emit(GameEvent::NewHighScore(state.score));
        }
    }
}
