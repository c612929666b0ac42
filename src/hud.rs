//! HUD values and the end-of-run summary
//!
//! The DOM overlay shows whole numbers only; the snapshot does the rounding
//! so every front-end agrees on what is displayed.

use serde::Serialize;

use crate::sim::{Form, GameState};

/// Per-frame values for the HUD overlay
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HudSnapshot {
    pub hp: u32,
    pub wave: u32,
    pub score: u64,
    /// Display name of the current form
    pub form: String,
}

impl HudSnapshot {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            hp: state.player.hp,
            wave: state.wave,
            score: state.player.score,
            form: display_name(state.player.form),
        }
    }
}

/// Form identifier with its first letter capitalised ("fourarms" -> "Fourarms")
pub fn display_name(form: Form) -> String {
    let id = form.as_str();
    let mut chars = id.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Final result of a run, reported once on game over
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub score: u64,
    pub wave: u32,
    pub form: Form,
    pub steps: u64,
}

impl RunSummary {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            score: state.player.score,
            wave: state.wave,
            form: state.player.form,
            steps: state.steps,
        }
    }

    /// Text shown in the game-over dialog
    pub fn message(&self) -> String {
        format!("Game Over! Score: {}\nYou reached wave {}", self.score, self.wave)
    }
}
