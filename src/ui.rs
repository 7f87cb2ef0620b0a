//! Text overlays
//!
//! The canvas only draws geometry; every piece of text is a DOM element
//! that the host shows, hides and fills from a [`Hud`] built per frame.

use crate::sim::{GamePhase, GameState, Rect};

pub const TITLE: &str = "Copy Bird";
pub const START_PROMPT: &str = "Click or Press Space to Start";
pub const THEME_BUTTON_LABEL: &str = "Change Color";
pub const PAUSED: &str = "Paused";
pub const GAME_OVER: &str = "Game Over";
pub const RESTART_PROMPT: &str = "Click to restart";

/// A text element on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HudSlot {
    Title,
    StartPrompt,
    /// "High Score: N" in the top-right corner of the title screen
    CornerHighScore,
    ThemeButton,
    Score,
    Paused,
    GameOver,
    FinalScore,
    FinalHighScore,
    RestartPrompt,
}

impl HudSlot {
    pub const ALL: [HudSlot; 10] = [
        HudSlot::Title,
        HudSlot::StartPrompt,
        HudSlot::CornerHighScore,
        HudSlot::ThemeButton,
        HudSlot::Score,
        HudSlot::Paused,
        HudSlot::GameOver,
        HudSlot::FinalScore,
        HudSlot::FinalHighScore,
        HudSlot::RestartPrompt,
    ];

    /// DOM id of the element backing this slot
    pub fn element_id(&self) -> &'static str {
        match self {
            HudSlot::Title => "title",
            HudSlot::StartPrompt => "start-prompt",
            HudSlot::CornerHighScore => "corner-high-score",
            HudSlot::ThemeButton => "theme-button",
            HudSlot::Score => "score",
            HudSlot::Paused => "paused",
            HudSlot::GameOver => "game-over",
            HudSlot::FinalScore => "final-score",
            HudSlot::FinalHighScore => "final-high-score",
            HudSlot::RestartPrompt => "restart-prompt",
        }
    }
}

/// Visible text for one frame. Slots not listed are hidden.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Hud {
    pub texts: Vec<(HudSlot, String)>,
    /// Where the theme button label sits, when shown
    pub theme_button: Option<Rect>,
}

impl Hud {
    pub fn build(state: &GameState) -> Self {
        let mut hud = Hud::default();
        let best = state.high_score.best;

        if state.phase == GamePhase::NotStarted {
            hud.show(HudSlot::Title, TITLE);
            hud.show(HudSlot::StartPrompt, START_PROMPT);
            hud.show(HudSlot::CornerHighScore, format!("High Score: {}", best));
            hud.show(HudSlot::ThemeButton, THEME_BUTTON_LABEL);
            hud.theme_button = Some(state.theme_button());
        }

        if state.phase.is_started() && state.phase != GamePhase::Paused {
            hud.show(HudSlot::Score, state.score.to_string());
        }

        match state.phase {
            GamePhase::Paused => hud.show(HudSlot::Paused, PAUSED),
            GamePhase::GameOver { landed: true } => {
                hud.show(HudSlot::GameOver, GAME_OVER);
                hud.show(HudSlot::FinalScore, format!("Score: {}", state.score));
                hud.show(HudSlot::FinalHighScore, format!("High Score: {}", best));
                hud.show(HudSlot::RestartPrompt, RESTART_PROMPT);
            }
            _ => {}
        }

        hud
    }

    fn show(&mut self, slot: HudSlot, text: impl Into<String>) {
        self.texts.push((slot, text.into()));
    }

    pub fn text(&self, slot: HudSlot) -> Option<&str> {
        self.texts
            .iter()
            .find(|(s, _)| *s == slot)
            .map(|(_, t)| t.as_str())
    }

    pub fn is_visible(&self, slot: HudSlot) -> bool {
        self.text(slot).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::HighScore;
    use crate::settings::Settings;
    use crate::sim::Viewport;
    use crate::tuning::Tuning;

    fn state() -> GameState {
        GameState::new(
            Viewport::new(800.0, 600.0),
            Tuning::default(),
            1,
            HighScore::new(12),
            Settings::default(),
        )
    }

    fn visible(hud: &Hud) -> Vec<HudSlot> {
        HudSlot::ALL
            .into_iter()
            .filter(|s| hud.is_visible(*s))
            .collect()
    }

    #[test]
    fn test_title_screen() {
        let state = state();
        let hud = Hud::build(&state);
        assert_eq!(
            visible(&hud),
            vec![
                HudSlot::Title,
                HudSlot::StartPrompt,
                HudSlot::CornerHighScore,
                HudSlot::ThemeButton
            ]
        );
        assert_eq!(hud.text(HudSlot::Title), Some("Copy Bird"));
        assert_eq!(hud.text(HudSlot::CornerHighScore), Some("High Score: 12"));
        assert_eq!(hud.theme_button, Some(state.theme_button()));
    }

    #[test]
    fn test_playing_shows_score_only() {
        let mut state = state();
        state.phase = GamePhase::Playing;
        state.score = 3;
        let hud = Hud::build(&state);
        assert_eq!(visible(&hud), vec![HudSlot::Score]);
        assert_eq!(hud.text(HudSlot::Score), Some("3"));
        assert_eq!(hud.theme_button, None);
    }

    #[test]
    fn test_paused_hides_score() {
        let mut state = state();
        state.phase = GamePhase::Paused;
        assert_eq!(visible(&Hud::build(&state)), vec![HudSlot::Paused]);
    }

    #[test]
    fn test_falling_bird_keeps_score_only() {
        let mut state = state();
        state.phase = GamePhase::GameOver { landed: false };
        assert_eq!(visible(&Hud::build(&state)), vec![HudSlot::Score]);
    }

    #[test]
    fn test_landed_game_over() {
        let mut state = state();
        state.phase = GamePhase::GameOver { landed: true };
        state.score = 4;
        let hud = Hud::build(&state);
        assert_eq!(
            visible(&hud),
            vec![
                HudSlot::Score,
                HudSlot::GameOver,
                HudSlot::FinalScore,
                HudSlot::FinalHighScore,
                HudSlot::RestartPrompt
            ]
        );
        assert_eq!(hud.text(HudSlot::FinalScore), Some("Score: 4"));
        assert_eq!(hud.text(HudSlot::FinalHighScore), Some("High Score: 12"));
        assert_eq!(hud.text(HudSlot::RestartPrompt), Some("Click to restart"));
    }

    #[test]
    fn test_element_ids_unique() {
        let mut ids: Vec<&str> = HudSlot::ALL.iter().map(|s| s.element_id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), HudSlot::ALL.len());
    }
}
