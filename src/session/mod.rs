//! Game modes and the controller that drives whichever one is active.

pub mod hard;
pub mod normal;
pub mod policy;
pub mod versus;

use crate::clock::Clock;
use crate::render::RenderModel;
use crate::round::GuessResult;
use crate::wordbank::{Language, LoadError, WordBank, WordSource};
use clap::ValueEnum;
use hard::HardSession;
use normal::NormalSession;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use versus::VersusSession;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum)]
pub enum Mode {
    Normal,
    Hard,
    Versus,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Normal, Mode::Hard, Mode::Versus];
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Normal => "Normal",
            Mode::Hard => "Hard",
            Mode::Versus => "Versus",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    pub const BOTH: [PlayerId; 2] = [PlayerId::One, PlayerId::Two];

    #[must_use]
    pub fn other(self) -> Self {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            PlayerId::One => "Player 1",
            PlayerId::Two => "Player 2",
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A mode could not start because its word list failed to load.
#[derive(Debug, Error)]
#[error("{mode} mode is unavailable")]
pub struct ModeUnavailable {
    pub mode: Mode,
    #[source]
    pub source: LoadError,
}

pub enum SessionController<C: Clock> {
    Normal(NormalSession),
    Hard(HardSession<C>),
    Versus(VersusSession<C>),
}

impl<C: Clock> SessionController<C> {
    /// Loads the word list for `language` and starts `mode` with an
    /// entropy-seeded generator.
    pub fn load(
        mode: Mode,
        source: &dyn WordSource,
        language: Language,
        clock: C,
    ) -> Result<Self, ModeUnavailable> {
        let bank = WordBank::load(source, language).map_err(|source| ModeUnavailable { mode, source })?;
        Ok(Self::start(mode, Arc::new(bank), clock))
    }

    #[must_use]
    pub fn start(mode: Mode, bank: Arc<WordBank>, clock: C) -> Self {
        Self::start_with_rng(mode, bank, clock, StdRng::from_os_rng())
    }

    #[must_use]
    pub fn start_with_rng(mode: Mode, bank: Arc<WordBank>, clock: C, rng: StdRng) -> Self {
        match mode {
            Mode::Normal => Self::Normal(NormalSession::new(bank, rng)),
            Mode::Hard => Self::Hard(HardSession::new(bank, clock, rng)),
            Mode::Versus => Self::Versus(VersusSession::new(bank, clock, rng)),
        }
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        match self {
            Self::Normal(_) => Mode::Normal,
            Self::Hard(_) => Mode::Hard,
            Self::Versus(_) => Mode::Versus,
        }
    }

    pub fn on_guess(&mut self, input: char) -> GuessResult {
        match self {
            Self::Normal(s) => s.on_guess(input),
            Self::Hard(s) => s.on_guess(input),
            Self::Versus(s) => s.on_guess(input),
        }
    }

    /// Returns whether a new round or session actually started.
    pub fn on_reset_trigger(&mut self) -> bool {
        match self {
            Self::Normal(s) => s.on_reset_trigger(),
            Self::Hard(s) => s.on_reset_trigger(),
            Self::Versus(s) => s.on_reset_trigger(),
        }
    }

    pub fn tick(&mut self) {
        match self {
            Self::Normal(_) => {}
            Self::Hard(s) => s.tick(),
            Self::Versus(s) => s.tick(),
        }
    }

    #[must_use]
    pub fn accepts_guesses(&self) -> bool {
        match self {
            Self::Normal(s) => s.accepts_guesses(),
            Self::Hard(s) => s.accepts_guesses(),
            Self::Versus(s) => s.accepts_guesses(),
        }
    }

    #[must_use]
    pub fn render_model(&self) -> RenderModel {
        match self {
            Self::Normal(s) => s.render_model(),
            Self::Hard(s) => s.render_model(),
            Self::Versus(s) => s.render_model(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::wordbank::EmbeddedWordSource;
    use std::error::Error as _;

    struct MissingSource;

    impl WordSource for MissingSource {
        fn read_language(&self, language: Language) -> Result<String, LoadError> {
            Err(LoadError::Empty(language))
        }
    }

    #[test]
    fn test_load_each_mode_from_embedded() {
        for mode in Mode::ALL {
            let controller =
                SessionController::load(mode, &EmbeddedWordSource, Language::Romanian, ManualClock::new(0))
                    .unwrap();
            assert_eq!(controller.mode(), mode);
            assert!(controller.accepts_guesses());
        }
    }

    #[test]
    fn test_load_failure_reports_mode() {
        let err = SessionController::load(Mode::Hard, &MissingSource, Language::English, ManualClock::new(0))
            .err()
            .unwrap();
        assert_eq!(err.mode, Mode::Hard);
        assert!(matches!(err.source, LoadError::Empty(Language::English)));
        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "Hard mode is unavailable");
    }

    #[test]
    fn test_dispatch_normal() {
        let bank = Arc::new(WordBank::parse(Language::English, "cat").unwrap());
        let mut c = SessionController::start_with_rng(
            Mode::Normal,
            bank,
            ManualClock::new(0),
            StdRng::seed_from_u64(3),
        );
        c.tick();
        assert_eq!(c.on_guess('c'), GuessResult::CorrectNew);
        assert!(!c.on_reset_trigger());
        c.on_guess('a');
        c.on_guess('t');
        assert!(!c.accepts_guesses());
        assert_eq!(c.render_model().title, "NORMAL MODE");
        assert!(c.on_reset_trigger());
        assert!(c.accepts_guesses());
    }

    #[test]
    fn test_dispatch_ticks_hard_clock() {
        let clock = ManualClock::new(0);
        let bank = Arc::new(WordBank::parse(Language::English, "cat").unwrap());
        let mut c = SessionController::start_with_rng(Mode::Hard, bank, clock.clone(), StdRng::seed_from_u64(3));
        clock.advance(40_000);
        c.tick();
        assert!(!c.accepts_guesses());
        assert!(c.on_reset_trigger());
    }

    #[test]
    fn test_player_id_helpers() {
        assert_eq!(PlayerId::One.other(), PlayerId::Two);
        assert_eq!(PlayerId::Two.other().index(), 0);
        assert_eq!(PlayerId::Two.to_string(), "Player 2");
    }
}
