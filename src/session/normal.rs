//! Normal mode: one untimed word, manual restart.

use super::policy::ModePolicy;
use crate::render::{Banner, PlayerView, RenderModel, Tone};
use crate::round::{GuessResult, Outcome, RoundState};
use crate::wordbank::WordBank;
use log::info;
use rand::rngs::StdRng;
use std::sync::Arc;

pub struct NormalSession {
    bank: Arc<WordBank>,
    rng: StdRng,
    policy: ModePolicy,
    round: RoundState,
}

impl NormalSession {
    #[must_use]
    pub fn new(bank: Arc<WordBank>, rng: StdRng) -> Self {
        let policy = ModePolicy::NORMAL;
        let mut session = Self {
            bank,
            rng,
            policy,
            // Placeholder; start_round picks the real word.
            round: RoundState::new("", policy.max_wrong_guesses),
        };
        session.start_round();
        session
    }

    /// Picks a fresh word and clears all guesses.
    pub fn start_round(&mut self) {
        let word = self.bank.random_word(&mut self.rng);
        self.round = RoundState::new(word, self.policy.max_wrong_guesses);
        info!("Normal mode: new word of length {}", word.len());
    }

    pub fn on_guess(&mut self, input: char) -> GuessResult {
        let result = self.round.apply_guess(input, self.policy.repeat_wrong);
        if result != GuessResult::NoOp && self.round.is_concluded() {
            info!(
                "Normal mode round over: {:?} with {} wrong guesses",
                self.round.outcome(),
                self.round.wrong_guesses()
            );
        }
        result
    }

    /// Starts a new round, but only once the current one has concluded.
    pub fn on_reset_trigger(&mut self) -> bool {
        if !self.round.is_concluded() {
            return false;
        }
        self.start_round();
        true
    }

    #[must_use]
    pub fn accepts_guesses(&self) -> bool {
        !self.round.is_concluded()
    }

    #[must_use]
    pub fn round(&self) -> &RoundState {
        &self.round
    }

    #[must_use]
    pub fn render_model(&self) -> RenderModel {
        let banner = match self.round.outcome() {
            Outcome::InProgress => None,
            Outcome::Won => Some(Banner::new("YOU WIN!", Tone::Success)),
            Outcome::Lost => Some(
                Banner::new("GAME OVER!", Tone::Failure)
                    .with_detail(format!("The word was: {}", self.round.target_word())),
            ),
        };
        let prompt = if self.round.is_concluded() {
            "Press any key to play again | ESC: Menu"
        } else {
            "Type a letter to guess | ESC: Menu"
        };
        RenderModel {
            title: "NORMAL MODE".to_string(),
            subtitle: None,
            players: vec![PlayerView::from_round("You", &self.round)],
            banner,
            prompt: prompt.to_string(),
            show_keyboard: !self.round.is_concluded(),
        }
    }
}
