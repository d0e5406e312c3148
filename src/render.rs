//! Read-only snapshots handed to presenters each frame.
//!
//! Controllers never draw; they describe what should be on screen and a
//! [`Presenter`] decides how.

use crate::letters::ALPHABET_SIZE;
use crate::round::{KeyMark, Outcome, RoundState};
use std::io;

/// Timers at or below this many seconds are flagged as low.
pub const LOW_TIME_SECONDS: i64 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Failure,
}

/// A headline message such as "YOU WIN!".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Banner {
    pub text: String,
    pub detail: Option<String>,
    pub tone: Tone,
}

impl Banner {
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            detail: None,
            tone,
        }
    }

    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimerView {
    pub text: String,
    pub is_low: bool,
}

impl TimerView {
    /// `live` marks the clock that is currently running.
    #[must_use]
    pub fn new(ms: i64, live: bool) -> Self {
        Self {
            text: format_timer(ms),
            is_low: live && ms / 1000 <= LOW_TIME_SECONDS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerView {
    pub label: String,
    pub display_mask: String,
    pub wrong_guesses: u32,
    pub max_wrong_guesses: u32,
    pub timer: Option<TimerView>,
    pub words_won: Option<u32>,
    pub is_active: bool,
    pub outcome: Outcome,
    pub keyboard: [KeyMark; ALPHABET_SIZE],
}

impl PlayerView {
    #[must_use]
    pub fn from_round(label: impl Into<String>, round: &RoundState) -> Self {
        Self {
            label: label.into(),
            display_mask: round.display_mask(),
            wrong_guesses: round.wrong_guesses(),
            max_wrong_guesses: round.max_wrong_guesses(),
            timer: None,
            words_won: None,
            is_active: true,
            outcome: round.outcome(),
            keyboard: round.key_marks(),
        }
    }
}

/// Everything a presenter needs to draw one frame of a mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderModel {
    pub title: String,
    pub subtitle: Option<String>,
    pub players: Vec<PlayerView>,
    pub banner: Option<Banner>,
    pub prompt: String,
    pub show_keyboard: bool,
}

pub trait Presenter {
    fn render_round_model(&mut self, model: &RenderModel) -> io::Result<()>;
}

pub const GALLOWS_HEIGHT: usize = 7;

/// ASCII gallows for a wrong-guess count, one body part per wrong guess.
#[must_use]
pub fn gallows(wrong_guesses: u32) -> [String; GALLOWS_HEIGHT] {
    let w = wrong_guesses;
    let part = |n: u32, s: &'static str| if w >= n { s } else { " " };
    [
        "  +---+".to_string(),
        "  |   |".to_string(),
        format!("  {}   |", part(1, "O")),
        format!(" {}{}{}  |", part(3, "/"), part(2, "|"), part(4, "\\")),
        format!(" {} {}  |", part(5, "/"), part(6, "\\")),
        "      |".to_string(),
        "=======".to_string(),
    ]
}

/// `MM:SS`, truncating partial seconds and clamping negatives to zero.
#[must_use]
pub fn format_timer(ms: i64) -> String {
    let seconds = ms.max(0) / 1000;
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
