//! Per-mode rule parameters.
//!
//! The three modes share one guess algorithm and differ only in the numbers
//! and switches collected here.

use super::Mode;
use crate::round::{MAX_WRONG_GUESSES, RepeatPolicy};

/// Adjustments granted when a round ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bonus {
    /// Wrong guesses taken back from the player the bonus applies to.
    pub guess_bonus: u32,
    /// Wrong guesses taken back from the opponent (versus only).
    pub opponent_guess_bonus: u32,
    pub time_bonus_ms: i64,
}

impl Bonus {
    pub const NONE: Bonus = Bonus {
        guess_bonus: 0,
        opponent_guess_bonus: 0,
        time_bonus_ms: 0,
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModePolicy {
    pub max_wrong_guesses: u32,
    pub repeat_wrong: RepeatPolicy,
    /// Starting time per round (hard) or per player (versus); `None` is untimed.
    pub time_limit_ms: Option<i64>,
    pub win_bonus: Bonus,
    pub loss_bonus: Bonus,
    pub correct_guess_time_bonus_ms: i64,
    /// How long a won round stays on screen before the next one starts.
    pub round_over_delay_ms: i64,
    /// Minimum time a finished session is shown before a reset is accepted.
    pub game_over_delay_ms: i64,
}

impl ModePolicy {
    pub const NORMAL: ModePolicy = ModePolicy {
        max_wrong_guesses: MAX_WRONG_GUESSES,
        repeat_wrong: RepeatPolicy::Ignore,
        time_limit_ms: None,
        win_bonus: Bonus::NONE,
        loss_bonus: Bonus::NONE,
        correct_guess_time_bonus_ms: 0,
        round_over_delay_ms: 0,
        game_over_delay_ms: 0,
    };

    pub const HARD: ModePolicy = ModePolicy {
        max_wrong_guesses: MAX_WRONG_GUESSES,
        repeat_wrong: RepeatPolicy::Ignore,
        time_limit_ms: Some(40_000),
        win_bonus: Bonus {
            guess_bonus: 2,
            opponent_guess_bonus: 0,
            time_bonus_ms: 20_000,
        },
        loss_bonus: Bonus::NONE,
        correct_guess_time_bonus_ms: 0,
        round_over_delay_ms: 1_500,
        game_over_delay_ms: 0,
    };

    pub const VERSUS: ModePolicy = ModePolicy {
        max_wrong_guesses: MAX_WRONG_GUESSES,
        repeat_wrong: RepeatPolicy::Penalize,
        time_limit_ms: Some(30_000),
        win_bonus: Bonus {
            guess_bonus: 4,
            opponent_guess_bonus: 2,
            time_bonus_ms: 0,
        },
        loss_bonus: Bonus::NONE,
        correct_guess_time_bonus_ms: 15_000,
        round_over_delay_ms: 1_500,
        game_over_delay_ms: 3_000,
    };

    #[must_use]
    pub fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Normal => Self::NORMAL,
            Mode::Hard => Self::HARD,
            Mode::Versus => Self::VERSUS,
        }
    }

    /// The starting clock; untimed modes report zero.
    #[must_use]
    pub fn initial_time_ms(&self) -> i64 {
        self.time_limit_ms.unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_versus_penalizes_repeats() {
        assert_eq!(ModePolicy::for_mode(Mode::Normal).repeat_wrong, RepeatPolicy::Ignore);
        assert_eq!(ModePolicy::for_mode(Mode::Hard).repeat_wrong, RepeatPolicy::Ignore);
        assert_eq!(ModePolicy::for_mode(Mode::Versus).repeat_wrong, RepeatPolicy::Penalize);
    }

    #[test]
    fn test_no_mode_grants_loss_bonus() {
        for mode in Mode::ALL {
            assert_eq!(ModePolicy::for_mode(mode).loss_bonus, Bonus::NONE);
        }
    }

    #[test]
    fn test_normal_mode_is_untimed() {
        assert_eq!(ModePolicy::NORMAL.time_limit_ms, None);
        assert_eq!(ModePolicy::NORMAL.initial_time_ms(), 0);
        assert_eq!(ModePolicy::HARD.initial_time_ms(), 40_000);
    }
}
