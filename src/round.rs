//! One player's guessing state for a single word.

use crate::letters::{ALPHABET_SIZE, Letter, LetterSet};

pub const MAX_WRONG_GUESSES: u32 = 6;
const PLACEHOLDER: char = '_';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Won,
    Lost,
}

/// Classification of a single key press against a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuessResult {
    /// Not a letter, or the round is already over. Nothing changed.
    NoOp,
    CorrectNew,
    WrongNew,
    CorrectRepeat,
    WrongRepeat,
}

impl GuessResult {
    #[must_use]
    pub fn is_wrong(self) -> bool {
        matches!(self, Self::WrongNew | Self::WrongRepeat)
    }
}

/// What a repeated wrong letter costs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RepeatPolicy {
    Ignore,
    Penalize,
}

/// Keyboard colouring for a letter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyMark {
    Unused,
    Hit,
    Miss,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundState {
    target: String,
    target_letters: LetterSet,
    guessed: LetterSet,
    wrong_guesses: u32,
    max_wrong_guesses: u32,
    time_left_ms: Option<i64>,
    outcome: Outcome,
}

impl RoundState {
    #[must_use]
    pub fn new(target: &str, max_wrong_guesses: u32) -> Self {
        Self {
            target: target.to_ascii_uppercase(),
            target_letters: LetterSet::from_word(target),
            guessed: LetterSet::new(),
            wrong_guesses: 0,
            max_wrong_guesses,
            time_left_ms: None,
            outcome: Outcome::InProgress,
        }
    }

    #[must_use]
    pub fn timed(target: &str, max_wrong_guesses: u32, time_left_ms: i64) -> Self {
        let mut round = Self::new(target, max_wrong_guesses);
        round.time_left_ms = Some(time_left_ms.max(0));
        round.refresh_outcome();
        round
    }

    #[must_use]
    pub fn target_word(&self) -> &str {
        &self.target
    }

    #[must_use]
    pub fn guessed_letters(&self) -> LetterSet {
        self.guessed
    }

    #[must_use]
    pub fn wrong_guesses(&self) -> u32 {
        self.wrong_guesses
    }

    #[must_use]
    pub fn max_wrong_guesses(&self) -> u32 {
        self.max_wrong_guesses
    }

    #[must_use]
    pub fn time_left_ms(&self) -> Option<i64> {
        self.time_left_ms
    }

    #[must_use]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    #[must_use]
    pub fn is_won(&self) -> bool {
        self.outcome == Outcome::Won
    }

    #[must_use]
    pub fn is_lost(&self) -> bool {
        self.outcome == Outcome::Lost
    }

    #[must_use]
    pub fn is_concluded(&self) -> bool {
        self.outcome != Outcome::InProgress
    }

    /// Evaluates one key press.
    ///
    /// A letter seen for the first time is recorded and scored; a repeated
    /// correct letter never changes anything, and a repeated wrong letter only
    /// costs a guess under [`RepeatPolicy::Penalize`].
    pub fn apply_guess(&mut self, input: char, repeat_wrong: RepeatPolicy) -> GuessResult {
        let Some(letter) = Letter::from_char(input) else {
            return GuessResult::NoOp;
        };
        if self.is_concluded() {
            return GuessResult::NoOp;
        }

        let in_word = self.target_letters.contains(letter);
        let result = if self.guessed.insert(letter) {
            if in_word {
                GuessResult::CorrectNew
            } else {
                self.wrong_guesses += 1;
                GuessResult::WrongNew
            }
        } else if in_word {
            GuessResult::CorrectRepeat
        } else {
            if repeat_wrong == RepeatPolicy::Penalize {
                self.wrong_guesses += 1;
            }
            GuessResult::WrongRepeat
        };

        self.refresh_outcome();
        result
    }

    /// Takes back up to `amount` wrong guesses, never below zero.
    pub fn apply_guess_bonus(&mut self, amount: u32) {
        self.wrong_guesses = self.wrong_guesses.saturating_sub(amount);
        self.refresh_outcome();
    }

    /// No-op on untimed rounds.
    pub fn set_time_left(&mut self, ms: i64) {
        if self.time_left_ms.is_some() {
            self.time_left_ms = Some(ms.max(0));
            self.refresh_outcome();
        }
    }

    pub fn add_time(&mut self, ms: i64) {
        if let Some(left) = self.time_left_ms {
            self.set_time_left(left + ms);
        }
    }

    /// The word as shown to the player, e.g. `"C A _"`.
    #[must_use]
    pub fn display_mask(&self) -> String {
        let mut mask = String::with_capacity(self.target.len() * 2);
        for (i, c) in self.target.chars().enumerate() {
            if i > 0 {
                mask.push(' ');
            }
            let shown = match Letter::from_char(c) {
                Some(letter) if !self.guessed.contains(letter) => PLACEHOLDER,
                _ => c,
            };
            mask.push(shown);
        }
        mask
    }

    #[must_use]
    pub fn key_marks(&self) -> [KeyMark; ALPHABET_SIZE] {
        let mut marks = [KeyMark::Unused; ALPHABET_SIZE];
        for letter in self.guessed.iter() {
            marks[letter.index()] = if self.target_letters.contains(letter) {
                KeyMark::Hit
            } else {
                KeyMark::Miss
            };
        }
        marks
    }

    // Only an in-progress round moves; a win is never undone by a later bonus
    // or timer update.
    fn refresh_outcome(&mut self) {
        if self.is_concluded() {
            return;
        }
        if self.guessed.is_superset(self.target_letters) {
            self.outcome = Outcome::Won;
        } else if self.wrong_guesses >= self.max_wrong_guesses
            || self.time_left_ms.is_some_and(|ms| ms <= 0)
        {
            self.outcome = Outcome::Lost;
        }
    }
}
