// Library interface for hangman
// The binary and the integration tests both build on these modules

pub mod app;
pub mod cli;
pub mod clock;
pub mod letters;
pub mod logging;
pub mod render;
pub mod round;
pub mod session;
pub mod tui;
pub mod wordbank;

// Re-export commonly used types for easier testing
pub use app::{App, AppControl, InputEvent, View};
pub use clock::{Clock, ManualClock, SystemClock};
pub use render::{Presenter, RenderModel};
pub use round::{GuessResult, Outcome, RepeatPolicy, RoundState};
pub use session::{Mode, ModeUnavailable, PlayerId, SessionController};
pub use wordbank::{
    DirectoryWordSource, EmbeddedWordSource, Language, LoadError, WordBank, WordSource,
};
