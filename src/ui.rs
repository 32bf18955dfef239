//! Overlay screens shown above the canvas
//!
//! The overlay is pure data here; the platform layer copies it into the DOM.

use crate::sim::GamePhase;

/// Glyph on the overlay button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Play,
    Retry,
}

impl Icon {
    pub fn glyph(self) -> &'static str {
        match self {
            Icon::Play => "\u{25B6}",
            Icon::Retry => "\u{21BB}",
        }
    }
}

/// Contents of the modal overlay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    pub title: &'static str,
    pub body: String,
    pub button: &'static str,
    pub icon: Icon,
}

impl Overlay {
    /// Overlay for `phase`, or `None` while the game is being played
    pub fn for_phase(phase: GamePhase, score: u32) -> Option<Self> {
        let overlay = match phase {
            GamePhase::Playing => return None,
            GamePhase::Ready => Overlay {
                title: "BREAKOUT",
                body: "Use your mouse to move the paddle. Destroy all the blocks to win."
                    .to_string(),
                button: "Start Game",
                icon: Icon::Play,
            },
            GamePhase::Paused => Overlay {
                title: "PAUSED",
                body: "Press Esc or P to resume.".to_string(),
                button: "Resume",
                icon: Icon::Play,
            },
            GamePhase::GameOver => Overlay {
                title: "GAME OVER",
                body: format!("Final Score: {score}"),
                button: "Try Again",
                icon: Icon::Retry,
            },
            GamePhase::Win => Overlay {
                title: "YOU WIN!",
                body: format!("Congratulations! Your Score: {score}"),
                button: "Play Again",
                icon: Icon::Retry,
            },
        };
        Some(overlay)
    }

    /// Button text with its glyph in front
    pub fn button_label(&self) -> String {
        format!("{} {}", self.icon.glyph(), self.button)
    }
}
