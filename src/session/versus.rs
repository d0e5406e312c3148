//! Versus mode: two players race on equal-length words with turn-based clocks.

use super::PlayerId;
use super::policy::{Bonus, ModePolicy};
use crate::clock::Clock;
use crate::render::{Banner, PlayerView, RenderModel, TimerView, Tone};
use crate::round::{GuessResult, RoundState};
use crate::wordbank::WordBank;
use log::info;
use rand::Rng;
use rand::rngs::StdRng;
use std::sync::Arc;

pub const MIN_WORD_LENGTH: usize = 4;
pub const MAX_WORD_LENGTH: usize = 10;
pub const WORDS_TO_WIN: u32 = 7;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VictoryReason {
    WordsGuessed,
    OpponentOutOfGuesses,
    OpponentOutOfTime,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VersusPhase {
    Playing,
    /// A word was guessed; new words follow after the display delay.
    RoundOver { at_ms: i64 },
    GameOver {
        at_ms: i64,
        winner: PlayerId,
        reason: VictoryReason,
    },
}

#[derive(Clone, Debug)]
struct Contestant {
    round: RoundState,
    words_won: u32,
}

pub struct VersusSession<C: Clock> {
    bank: Arc<WordBank>,
    clock: C,
    rng: StdRng,
    policy: ModePolicy,
    players: [Contestant; 2],
    current_turn: PlayerId,
    common_word_length: usize,
    turn_started_at: i64,
    phase: VersusPhase,
}

impl<C: Clock> VersusSession<C> {
    #[must_use]
    pub fn new(bank: Arc<WordBank>, clock: C, rng: StdRng) -> Self {
        let policy = ModePolicy::VERSUS;
        // Placeholder; start_session deals the real words.
        let blank = Contestant {
            round: RoundState::timed("", policy.max_wrong_guesses, policy.initial_time_ms()),
            words_won: 0,
        };
        let mut session = Self {
            bank,
            clock,
            rng,
            policy,
            players: [blank.clone(), blank],
            current_turn: PlayerId::One,
            common_word_length: MIN_WORD_LENGTH,
            turn_started_at: 0,
            phase: VersusPhase::Playing,
        };
        session.start_session();
        session
    }

    /// Full reset: scores cleared and both clocks back to the initial time.
    pub fn start_session(&mut self) {
        info!("Versus mode: new session");
        self.reset(true);
    }

    /// Round-only reset: scores and remaining time carry over.
    pub fn start_round(&mut self) {
        self.reset(false);
    }

    fn reset(&mut self, full: bool) {
        self.common_word_length = self.rng.random_range(MIN_WORD_LENGTH..=MAX_WORD_LENGTH);
        for contestant in &mut self.players {
            let time_left = if full {
                self.policy.initial_time_ms()
            } else {
                contestant.round.time_left_ms().unwrap_or(0)
            };
            if full {
                contestant.words_won = 0;
            }
            // Each player draws separately, so a length with no words can hand
            // them different-length fallbacks.
            let word = self
                .bank
                .random_word_of_length(self.common_word_length, &mut self.rng);
            contestant.round = RoundState::timed(word, self.policy.max_wrong_guesses, time_left);
        }
        self.current_turn = if self.rng.random_bool(0.5) {
            PlayerId::One
        } else {
            PlayerId::Two
        };
        self.turn_started_at = self.clock.now_ms();
        self.phase = VersusPhase::Playing;
        info!(
            "Versus mode: words {}-{}, length {}, {} starts",
            self.players[0].words_won,
            self.players[1].words_won,
            self.common_word_length,
            self.current_turn
        );
    }

    /// Applies a guess for whoever holds the turn.
    pub fn on_guess(&mut self, input: char) -> GuessResult {
        self.update_timer();
        if self.phase != VersusPhase::Playing {
            return GuessResult::NoOp;
        }

        let active = self.current_turn;
        let now = self.clock.now_ms();
        let round = &mut self.players[active.index()].round;
        let result = round.apply_guess(input, self.policy.repeat_wrong);
        match result {
            GuessResult::NoOp | GuessResult::CorrectRepeat => return result,
            GuessResult::CorrectNew => round.add_time(self.policy.correct_guess_time_bonus_ms),
            GuessResult::WrongNew | GuessResult::WrongRepeat => {}
        }

        if round.is_won() {
            self.win_round(active, now);
        } else if round.is_lost() {
            info!("Versus mode: {active} ran out of guesses");
            self.apply_bonus(active, self.policy.loss_bonus);
            self.end_game(active.other(), VictoryReason::OpponentOutOfGuesses, now);
        } else if result.is_wrong() {
            self.bank_elapsed(now);
            self.current_turn = active.other();
            self.turn_started_at = now;
            info!("Versus mode: wrong guess, {} to play", self.current_turn);
        } else {
            self.turn_started_at = now;
        }
        result
    }

    /// Runs the live clock and clears a finished round once its delay passes.
    pub fn tick(&mut self) {
        self.update_timer();
        if let VersusPhase::RoundOver { at_ms } = self.phase
            && self.clock.now_ms() - at_ms >= self.policy.round_over_delay_ms
        {
            self.start_round();
        }
    }

    /// Starts a new session once a finished one has been on screen long enough.
    pub fn on_reset_trigger(&mut self) -> bool {
        if let VersusPhase::GameOver { at_ms, .. } = self.phase
            && self.clock.now_ms() - at_ms >= self.policy.game_over_delay_ms
        {
            self.start_session();
            return true;
        }
        false
    }

    #[must_use]
    pub fn accepts_guesses(&self) -> bool {
        self.phase == VersusPhase::Playing
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &RoundState {
        &self.players[id.index()].round
    }

    #[must_use]
    pub fn words_won(&self, id: PlayerId) -> u32 {
        self.players[id.index()].words_won
    }

    #[must_use]
    pub fn current_turn(&self) -> PlayerId {
        self.current_turn
    }

    #[must_use]
    pub fn common_word_length(&self) -> usize {
        self.common_word_length
    }

    #[must_use]
    pub fn phase(&self) -> VersusPhase {
        self.phase
    }

    fn win_round(&mut self, active: PlayerId, now: i64) {
        let contestant = &mut self.players[active.index()];
        contestant.words_won += 1;
        let words_won = contestant.words_won;
        self.apply_bonus(active, self.policy.win_bonus);
        info!("Versus mode: {active} guessed the word ({words_won}/{WORDS_TO_WIN})");

        if words_won >= WORDS_TO_WIN {
            self.end_game(active, VictoryReason::WordsGuessed, now);
        } else {
            self.phase = VersusPhase::RoundOver { at_ms: now };
        }
    }

    fn apply_bonus(&mut self, player: PlayerId, bonus: Bonus) {
        self.players[player.index()]
            .round
            .apply_guess_bonus(bonus.guess_bonus);
        self.players[player.other().index()]
            .round
            .apply_guess_bonus(bonus.opponent_guess_bonus);
    }

    fn end_game(&mut self, winner: PlayerId, reason: VictoryReason, now: i64) {
        info!("Versus mode: {winner} wins the session ({reason:?})");
        self.phase = VersusPhase::GameOver {
            at_ms: now,
            winner,
            reason,
        };
    }

    /// Charges the active player for the time since their segment started.
    fn bank_elapsed(&mut self, now: i64) {
        let round = &mut self.players[self.current_turn.index()].round;
        if let Some(left) = round.time_left_ms() {
            round.set_time_left(left - (now - self.turn_started_at));
        }
        self.turn_started_at = now;
    }

    fn update_timer(&mut self) {
        if self.phase != VersusPhase::Playing {
            return;
        }
        let now = self.clock.now_ms();
        self.bank_elapsed(now);
        let active = self.current_turn;
        if self.players[active.index()].round.is_lost() {
            info!("Versus mode: {active} ran out of time");
            self.apply_bonus(active, self.policy.loss_bonus);
            self.end_game(active.other(), VictoryReason::OpponentOutOfTime, now);
        }
    }

    fn banner(&self) -> Option<Banner> {
        match self.phase {
            VersusPhase::Playing => None,
            VersusPhase::RoundOver { .. } => {
                let guesser = PlayerId::BOTH
                    .into_iter()
                    .find(|id| self.player(*id).is_won())
                    .unwrap_or(self.current_turn);
                Some(Banner::new(
                    format!(
                        "{} GUESSED THE WORD! +{} Guesses!",
                        guesser.label().to_uppercase(),
                        self.policy.win_bonus.guess_bonus
                    ),
                    Tone::Info,
                ))
            }
            VersusPhase::GameOver { winner, reason, .. } => {
                let loser = winner.other();
                let text = match reason {
                    VictoryReason::WordsGuessed => format!(
                        "{} WINS THE GAME! ({WORDS_TO_WIN} Words)",
                        winner.label().to_uppercase()
                    ),
                    VictoryReason::OpponentOutOfGuesses | VictoryReason::OpponentOutOfTime => {
                        format!(
                            "{} LOST! {} WINS!",
                            loser.label().to_uppercase(),
                            winner.label().to_uppercase()
                        )
                    }
                };
                let banner = Banner::new(text, Tone::Success);
                Some(match reason {
                    VictoryReason::WordsGuessed => banner,
                    VictoryReason::OpponentOutOfGuesses => banner.with_detail(format!(
                        "{} ran out of guesses. The word was: {}",
                        loser.label(),
                        self.player(loser).target_word()
                    )),
                    VictoryReason::OpponentOutOfTime => banner.with_detail(format!(
                        "{} ran out of time. The word was: {}",
                        loser.label(),
                        self.player(loser).target_word()
                    )),
                })
            }
        }
    }

    #[must_use]
    pub fn render_model(&self) -> RenderModel {
        let playing = self.phase == VersusPhase::Playing;
        let players = PlayerId::BOTH
            .into_iter()
            .map(|id| {
                let contestant = &self.players[id.index()];
                let is_active = id == self.current_turn;
                let mut view = PlayerView::from_round(id.label(), &contestant.round);
                view.is_active = is_active;
                view.words_won = Some(contestant.words_won);
                view.timer = contestant
                    .round
                    .time_left_ms()
                    .map(|ms| TimerView::new(ms, playing && is_active));
                view
            })
            .collect();

        let prompt = match self.phase {
            VersusPhase::Playing => format!("{} to guess | ESC: Menu", self.current_turn.label()),
            VersusPhase::RoundOver { .. } => "Next round in...".to_string(),
            VersusPhase::GameOver { .. } => {
                "Press any key to play again (new game) | ESC: Menu".to_string()
            }
        };

        RenderModel {
            title: "VERSUS MODE".to_string(),
            subtitle: Some(format!(
                "Word length: {} | First to {WORDS_TO_WIN} words",
                self.common_word_length
            )),
            players,
            banner: self.banner(),
            prompt,
            show_keyboard: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::round::Outcome;
    use crate::wordbank::Language;
    use rand::SeedableRng;

    // One word per length so both players always share it.
    const ONE_PER_LENGTH: &str = "wolf\nhorse\nbridge\ncaptain\nelephant\nadventure\nbasketball";

    fn session(words: &str, seed: u64) -> (VersusSession<ManualClock>, ManualClock) {
        let clock = ManualClock::new(0);
        let bank = Arc::new(WordBank::parse(Language::English, words).unwrap());
        let s = VersusSession::new(bank, clock.clone(), StdRng::seed_from_u64(seed));
        (s, clock)
    }

    fn solve_active(s: &mut VersusSession<ManualClock>) {
        let word = s.player(s.current_turn()).target_word().to_string();
        for c in word.chars() {
            s.on_guess(c);
        }
    }

    #[test]
    fn test_start_session_defaults() {
        for seed in 0..10 {
            let (s, _) = session(ONE_PER_LENGTH, seed);
            let len = s.common_word_length();
            assert!((MIN_WORD_LENGTH..=MAX_WORD_LENGTH).contains(&len));
            for id in PlayerId::BOTH {
                assert_eq!(s.player(id).target_word().len(), len);
                assert_eq!(s.player(id).time_left_ms(), Some(30_000));
                assert_eq!(s.words_won(id), 0);
            }
            assert_eq!(s.phase(), VersusPhase::Playing);
        }
    }

    #[test]
    fn test_repeated_wrong_letter_penalized() {
        let (mut s, _) = session("cats", 1);
        let active = s.current_turn();
        assert_eq!(s.on_guess('Q'), GuessResult::WrongNew);
        assert_eq!(s.current_turn(), active.other());
        s.on_guess('Z');
        assert_eq!(s.on_guess('Q'), GuessResult::WrongRepeat);
        assert_eq!(s.player(active).wrong_guesses(), 2);
    }

    #[test]
    fn test_wrong_guess_switches_turn_and_banks_time() {
        let (mut s, clock) = session("cats", 2);
        let first = s.current_turn();
        clock.advance(4_000);
        s.on_guess('Q');
        assert_eq!(s.current_turn(), first.other());
        assert_eq!(s.player(first).time_left_ms(), Some(26_000));

        clock.advance(1_000);
        s.tick();
        assert_eq!(s.player(first).time_left_ms(), Some(26_000));
        assert_eq!(s.player(first.other()).time_left_ms(), Some(29_000));
    }

    #[test]
    fn test_correct_guess_keeps_turn_and_adds_time() {
        let (mut s, clock) = session("cats", 3);
        let first = s.current_turn();
        clock.advance(2_000);
        assert_eq!(s.on_guess('C'), GuessResult::CorrectNew);
        assert_eq!(s.current_turn(), first);
        assert_eq!(s.player(first).time_left_ms(), Some(28_000 + 15_000));

        assert_eq!(s.on_guess('C'), GuessResult::CorrectRepeat);
        assert_eq!(s.current_turn(), first);
        assert_eq!(s.player(first).time_left_ms(), Some(43_000));
    }

    #[test]
    fn test_correct_segment_restarts_without_losing_elapsed() {
        let (mut s, clock) = session("cats", 4);
        let first = s.current_turn();
        s.on_guess('C');
        clock.advance(3_000);
        s.tick();
        clock.advance(2_000);
        s.on_guess('A');
        assert_eq!(s.player(first).time_left_ms(), Some(45_000 - 5_000 + 15_000));
    }

    #[test]
    fn test_consolation_bonus_for_opponent() {
        let (mut s, _) = session("cats", 5);
        while s.player(PlayerId::Two).wrong_guesses() < 5 {
            s.on_guess('Q');
        }
        assert_eq!(s.current_turn(), PlayerId::One);
        let p1_wrong = s.player(PlayerId::One).wrong_guesses();
        assert!(p1_wrong <= 5);
        solve_active(&mut s);

        assert_eq!(s.words_won(PlayerId::One), 1);
        assert_eq!(s.player(PlayerId::One).wrong_guesses(), p1_wrong.saturating_sub(4));
        assert_eq!(s.player(PlayerId::Two).wrong_guesses(), 3);
        assert!(matches!(s.phase(), VersusPhase::RoundOver { .. }));
    }

    #[test]
    fn test_round_over_auto_clears_after_delay() {
        let (mut s, clock) = session(ONE_PER_LENGTH, 6);
        let winner = s.current_turn();
        clock.advance(500);
        solve_active(&mut s);
        let left = s.player(winner).time_left_ms();
        let other_left = s.player(winner.other()).time_left_ms();
        assert!(!s.accepts_guesses());
        assert_eq!(s.on_guess('Q'), GuessResult::NoOp);

        clock.advance(1_499);
        s.tick();
        assert!(matches!(s.phase(), VersusPhase::RoundOver { .. }));

        clock.advance(1);
        s.tick();
        assert_eq!(s.phase(), VersusPhase::Playing);
        assert_eq!(s.words_won(winner), 1);
        assert_eq!(s.player(winner).time_left_ms(), left);
        assert_eq!(s.player(winner.other()).time_left_ms(), other_left);
        assert_eq!(s.player(winner).wrong_guesses(), 0);
        assert_eq!(s.player(winner).outcome(), Outcome::InProgress);
        let len = s.common_word_length();
        assert_eq!(s.player(PlayerId::One).target_word().len(), len);
        assert_eq!(s.player(PlayerId::Two).target_word().len(), len);
    }

    #[test]
    fn test_out_of_guesses_ends_session_without_consolation() {
        let (mut s, _) = session("cats", 7);
        let first = s.current_turn();
        let mut last_opponent_wrong = 0;
        while s.accepts_guesses() {
            if s.current_turn() == first {
                last_opponent_wrong = s.player(first.other()).wrong_guesses();
            }
            s.on_guess('Q');
        }
        assert_eq!(s.player(first).wrong_guesses(), 6);
        assert_eq!(s.player(first).outcome(), Outcome::Lost);
        assert_eq!(s.player(first.other()).wrong_guesses(), last_opponent_wrong);
        assert_eq!(
            s.phase(),
            VersusPhase::GameOver {
                at_ms: 0,
                winner: first.other(),
                reason: VictoryReason::OpponentOutOfGuesses,
            }
        );
    }

    #[test]
    fn test_timeout_ends_session() {
        let (mut s, clock) = session("cats", 8);
        let first = s.current_turn();
        clock.advance(30_000);
        s.tick();
        assert_eq!(s.player(first).outcome(), Outcome::Lost);
        assert_eq!(s.player(first).time_left_ms(), Some(0));
        assert!(matches!(
            s.phase(),
            VersusPhase::GameOver {
                reason: VictoryReason::OpponentOutOfTime,
                ..
            }
        ));
        assert_eq!(s.player(first.other()).time_left_ms(), Some(30_000));
    }

    #[test]
    fn test_only_active_clock_runs() {
        let (mut s, clock) = session("cats", 9);
        let first = s.current_turn();
        for _ in 0..10 {
            clock.advance(1_000);
            s.tick();
        }
        assert_eq!(s.player(first).time_left_ms(), Some(20_000));
        assert_eq!(s.player(first.other()).time_left_ms(), Some(30_000));
    }

    #[test]
    fn test_expired_clock_rejects_late_guess() {
        let (mut s, clock) = session("cats", 10);
        clock.advance(31_000);
        assert_eq!(s.on_guess('C'), GuessResult::NoOp);
        assert!(matches!(s.phase(), VersusPhase::GameOver { .. }));
    }

    #[test]
    fn test_game_over_reset_requires_delay() {
        let (mut s, clock) = session("cats", 11);
        clock.advance(30_000);
        s.tick();
        clock.advance(2_999);
        assert!(!s.on_reset_trigger());
        clock.advance(1);
        assert!(s.on_reset_trigger());
        assert_eq!(s.phase(), VersusPhase::Playing);
        for id in PlayerId::BOTH {
            assert_eq!(s.player(id).time_left_ms(), Some(30_000));
            assert_eq!(s.words_won(id), 0);
        }
    }

    #[test]
    fn test_reset_trigger_ignored_during_play_and_round_over() {
        let (mut s, _) = session("cats", 12);
        assert!(!s.on_reset_trigger());
        solve_active(&mut s);
        assert!(matches!(s.phase(), VersusPhase::RoundOver { .. }));
        assert!(!s.on_reset_trigger());
    }

    #[test]
    fn test_seven_words_wins_session() {
        let (mut s, clock) = session(ONE_PER_LENGTH, 13);
        let mut winner = None;
        for _ in 0..20 {
            let active = s.current_turn();
            solve_active(&mut s);
            if let VersusPhase::GameOver { winner: w, reason, .. } = s.phase() {
                assert_eq!(reason, VictoryReason::WordsGuessed);
                assert_eq!(w, active);
                assert_eq!(s.words_won(active), WORDS_TO_WIN);
                winner = Some(w);
                break;
            }
            clock.advance(1_500);
            s.tick();
        }
        let winner = winner.expect("someone reaches seven words");
        let banner = s.render_model().banner.unwrap();
        assert!(banner.text.contains("WINS THE GAME"));
        assert!(banner.text.contains(&winner.label().to_uppercase()));
        assert_eq!(banner.tone, Tone::Success);
    }

    #[test]
    fn test_round_over_banner_is_informational() {
        let (mut s, _) = session(ONE_PER_LENGTH, 6);
        let winner = s.current_turn();
        solve_active(&mut s);
        let banner = s.render_model().banner.unwrap();
        assert_eq!(banner.tone, Tone::Info);
        assert!(banner.text.starts_with(&winner.label().to_uppercase()));
        assert!(banner.text.contains("GUESSED THE WORD! +4 Guesses!"));
    }

    #[test]
    fn test_fallback_can_mismatch_lengths() {
        let (s, _) = session("cat\nbasketball", 14);
        for id in PlayerId::BOTH {
            let word = s.player(id).target_word();
            assert!(word == "CAT" || word == "BASKETBALL");
        }
    }

    #[test]
    fn test_render_model_marks_active_player() {
        let (s, _) = session("cats", 15);
        let model = s.render_model();
        assert_eq!(model.players.len(), 2);
        let active = s.current_turn().index();
        assert!(model.players[active].is_active);
        assert!(!model.players[1 - active].is_active);
        assert_eq!(model.players[0].words_won, Some(0));
        assert!(!model.show_keyboard);
    }
}
