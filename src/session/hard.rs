//! Hard mode: timed rounds with a word that grows one letter per win.

use super::policy::ModePolicy;
use crate::clock::Clock;
use crate::render::{Banner, PlayerView, RenderModel, TimerView, Tone};
use crate::round::{GuessResult, RoundState};
use crate::wordbank::WordBank;
use log::info;
use rand::rngs::StdRng;
use std::sync::Arc;

pub const INITIAL_WORD_LENGTH: usize = 3;
pub const MAX_WORD_LENGTH: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HardPhase {
    Playing,
    /// Word guessed; the next round starts once the display delay has passed.
    RoundWon { at_ms: i64 },
    Lost,
    /// The longest word was guessed.
    OverallWon,
}

pub struct HardSession<C: Clock> {
    bank: Arc<WordBank>,
    clock: C,
    rng: StdRng,
    policy: ModePolicy,
    round: RoundState,
    current_word_length: usize,
    round_time_limit_ms: i64,
    round_started_at: i64,
    rounds_won: u32,
    phase: HardPhase,
}

impl<C: Clock> HardSession<C> {
    #[must_use]
    pub fn new(bank: Arc<WordBank>, clock: C, rng: StdRng) -> Self {
        let policy = ModePolicy::HARD;
        let round_time_limit_ms = policy.initial_time_ms();
        let round_started_at = clock.now_ms();
        let mut session = Self {
            bank,
            clock,
            rng,
            policy,
            // Placeholder; start_game deals the first word.
            round: RoundState::timed("", policy.max_wrong_guesses, round_time_limit_ms),
            current_word_length: INITIAL_WORD_LENGTH,
            round_time_limit_ms,
            round_started_at,
            rounds_won: 0,
            phase: HardPhase::Playing,
        };
        session.start_game();
        session
    }

    /// Back to three letters and the initial time limit.
    pub fn start_game(&mut self) {
        self.current_word_length = INITIAL_WORD_LENGTH;
        self.round_time_limit_ms = self.policy.initial_time_ms();
        self.rounds_won = 0;
        info!("Hard mode: new game");
        self.begin_round();
    }

    fn begin_round(&mut self) {
        let word = self
            .bank
            .random_word_of_length(self.current_word_length, &mut self.rng);
        self.round = RoundState::timed(word, self.policy.max_wrong_guesses, self.round_time_limit_ms);
        self.round_started_at = self.clock.now_ms();
        self.phase = HardPhase::Playing;
        info!(
            "Hard mode: round {} with length {} and {} ms",
            self.rounds_won + 1,
            self.current_word_length,
            self.round_time_limit_ms
        );
    }

    pub fn on_guess(&mut self, input: char) -> GuessResult {
        self.update_timer();
        if self.phase != HardPhase::Playing {
            return GuessResult::NoOp;
        }

        let result = self.round.apply_guess(input, self.policy.repeat_wrong);
        if self.round.is_won() {
            let bonus = self.policy.win_bonus;
            self.round_time_limit_ms += bonus.time_bonus_ms;
            self.round.apply_guess_bonus(bonus.guess_bonus);
            self.rounds_won += 1;
            self.phase = HardPhase::RoundWon {
                at_ms: self.clock.now_ms(),
            };
            info!(
                "Hard mode: word guessed, time limit now {} ms, wrong guesses {}",
                self.round_time_limit_ms,
                self.round.wrong_guesses()
            );
        } else if self.round.is_lost() {
            self.lose();
        }
        result
    }

    /// Advances the countdown and any pending round transition. Safe to call
    /// any number of times.
    pub fn tick(&mut self) {
        self.update_timer();
        if let HardPhase::RoundWon { at_ms } = self.phase
            && self.clock.now_ms() - at_ms >= self.policy.round_over_delay_ms
        {
            self.advance();
        }
    }

    /// Starts a fresh game after a loss or an overall win. Ignored otherwise.
    pub fn on_reset_trigger(&mut self) -> bool {
        match self.phase {
            HardPhase::Lost | HardPhase::OverallWon => {
                self.start_game();
                true
            }
            HardPhase::Playing | HardPhase::RoundWon { .. } => false,
        }
    }

    #[must_use]
    pub fn accepts_guesses(&self) -> bool {
        self.phase == HardPhase::Playing
    }

    #[must_use]
    pub fn round(&self) -> &RoundState {
        &self.round
    }

    #[must_use]
    pub fn phase(&self) -> HardPhase {
        self.phase
    }

    #[must_use]
    pub fn current_word_length(&self) -> usize {
        self.current_word_length
    }

    #[must_use]
    pub fn round_time_limit_ms(&self) -> i64 {
        self.round_time_limit_ms
    }

    #[must_use]
    pub fn rounds_won(&self) -> u32 {
        self.rounds_won
    }

    fn advance(&mut self) {
        if self.current_word_length < MAX_WORD_LENGTH {
            self.current_word_length += 1;
            self.begin_round();
        } else {
            info!("Hard mode: overall win after {} rounds", self.rounds_won);
            self.phase = HardPhase::OverallWon;
        }
    }

    fn lose(&mut self) {
        self.phase = HardPhase::Lost;
        info!(
            "Hard mode: lost at length {} ({} wrong, {:?} ms left)",
            self.current_word_length,
            self.round.wrong_guesses(),
            self.round.time_left_ms()
        );
    }

    // The remaining time is derived from the round start on every call rather
    // than counted down, so repeated ticks cannot drift.
    fn update_timer(&mut self) {
        if self.phase != HardPhase::Playing {
            return;
        }
        let elapsed = self.clock.now_ms() - self.round_started_at;
        self.round.set_time_left(self.round_time_limit_ms - elapsed);
        if self.round.is_lost() {
            self.lose();
        }
    }

    #[must_use]
    pub fn render_model(&self) -> RenderModel {
        let live = self.phase == HardPhase::Playing;
        let mut player = PlayerView::from_round("You", &self.round);
        player.timer = self
            .round
            .time_left_ms()
            .map(|ms| TimerView::new(ms, live));

        let (banner, prompt) = match self.phase {
            HardPhase::Playing => (None, "Type a letter to guess | ESC: Menu"),
            HardPhase::RoundWon { .. } => (
                Some(Banner::new("WORD GUESSED!", Tone::Success).with_detail(format!(
                    "+{}s, +{} guesses",
                    self.policy.win_bonus.time_bonus_ms / 1000,
                    self.policy.win_bonus.guess_bonus
                ))),
                "Next word coming up...",
            ),
            HardPhase::Lost => {
                let headline = if self.round.time_left_ms().is_some_and(|ms| ms <= 0) {
                    "TIME'S UP!"
                } else {
                    "GAME OVER!"
                };
                (
                    Some(
                        Banner::new(headline, Tone::Failure)
                            .with_detail(format!("The word was: {}", self.round.target_word())),
                    ),
                    "Press any key to play again | ESC: Menu",
                )
            }
            HardPhase::OverallWon => (
                Some(
                    Banner::new("CONGRATULATIONS! YOU BEAT HARD MODE!", Tone::Success)
                        .with_detail(format!("{} words guessed", self.rounds_won)),
                ),
                "Press any key to play again | ESC: Menu",
            ),
        };

        RenderModel {
            title: "HARD MODE".to_string(),
            subtitle: Some(format!(
                "Word length: {} / {}",
                self.current_word_length, MAX_WORD_LENGTH
            )),
            players: vec![player],
            banner,
            prompt: prompt.to_string(),
            show_keyboard: live,
        }
    }
}
