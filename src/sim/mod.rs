//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick
//! - Seeded RNG only
//! - Input arrives through the queue, never from callbacks
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod scenery;
pub mod sky;
pub mod state;
pub mod tick;

pub use collision::{Fatal, Rect, bird_hits_pipe};
pub use input::{InputEvent, InputQueue};
pub use scenery::{Cloud, CloudPart, Scenery, Star};
pub use sky::SkyCycle;
pub use state::{Bird, GameEvent, GamePhase, GameState, Pipe, Viewport};
pub use tick::{TickOutcome, apply_input, tick};
