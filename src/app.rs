//! Screen state shared by the terminal and plain-text front ends.

use crate::clock::Clock;
use crate::render::RenderModel;
use crate::session::{Mode, ModeUnavailable, SessionController};
use crate::wordbank::{Language, WordBank, WordSource};
use log::{info, warn};
use std::sync::Arc;

/// Front-end neutral key events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Char(char),
    Enter,
    Up,
    Down,
    Escape,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppControl {
    Continue,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuItem {
    Play(Mode),
    Language,
}

impl MenuItem {
    pub const MAIN: [MenuItem; 4] = [
        MenuItem::Play(Mode::Normal),
        MenuItem::Play(Mode::Hard),
        MenuItem::Play(Mode::Versus),
        MenuItem::Language,
    ];
}

/// A list screen: the main menu or the language picker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuView {
    pub title: String,
    pub items: Vec<String>,
    pub selected: usize,
    pub notice: Option<String>,
    pub footer: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum View {
    Menu(MenuView),
    Game(RenderModel),
}

enum Screen<C: Clock> {
    MainMenu { selected: usize },
    LanguageSelect { selected: usize },
    Playing(SessionController<C>),
}

pub struct App<C: Clock + Clone> {
    source: Box<dyn WordSource>,
    clock: C,
    language: Language,
    bank: Option<Arc<WordBank>>,
    screen: Screen<C>,
    notice: Option<String>,
}

impl<C: Clock + Clone> App<C> {
    pub fn new(source: Box<dyn WordSource>, language: Language, clock: C) -> Self {
        Self {
            source,
            clock,
            language,
            bank: None,
            screen: Screen::MainMenu { selected: 0 },
            notice: None,
        }
    }

    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    /// The mode being played, if any.
    #[must_use]
    pub fn mode(&self) -> Option<Mode> {
        match &self.screen {
            Screen::Playing(controller) => Some(controller.mode()),
            Screen::MainMenu { .. } | Screen::LanguageSelect { .. } => None,
        }
    }

    #[must_use]
    pub fn controller(&self) -> Option<&SessionController<C>> {
        match &self.screen {
            Screen::Playing(controller) => Some(controller),
            Screen::MainMenu { .. } | Screen::LanguageSelect { .. } => None,
        }
    }

    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Loads the current language's words if needed and enters `mode`.
    /// On failure the menu stays up with a notice.
    pub fn start_mode(&mut self, mode: Mode) -> Result<(), ModeUnavailable> {
        let bank = match self.bank.clone() {
            Some(bank) => bank,
            None => match WordBank::load(self.source.as_ref(), self.language) {
                Ok(bank) => {
                    info!("Loaded {} {} words", bank.len(), self.language);
                    let bank = Arc::new(bank);
                    self.bank = Some(Arc::clone(&bank));
                    bank
                }
                Err(source) => {
                    let err = ModeUnavailable { mode, source };
                    warn!("{err}: {}", err.source);
                    self.notice = Some(format!("{err}: {}", err.source));
                    self.screen = Screen::MainMenu {
                        selected: menu_index(mode),
                    };
                    return Err(err);
                }
            },
        };
        info!("Starting {mode} mode");
        self.notice = None;
        self.screen = Screen::Playing(SessionController::start(mode, bank, self.clock.clone()));
        Ok(())
    }

    pub fn set_language(&mut self, language: Language) {
        if language != self.language {
            info!("Language changed to {language}");
            self.language = language;
            self.bank = None;
        }
    }

    pub fn tick(&mut self) {
        if let Screen::Playing(controller) = &mut self.screen {
            controller.tick();
        }
    }

    pub fn handle(&mut self, event: InputEvent) -> AppControl {
        match &mut self.screen {
            Screen::MainMenu { selected } => match event {
                InputEvent::Escape => return AppControl::Quit,
                InputEvent::Up => *selected = step(*selected, MenuItem::MAIN.len(), false),
                InputEvent::Down => *selected = step(*selected, MenuItem::MAIN.len(), true),
                InputEvent::Enter => match MenuItem::MAIN[*selected] {
                    MenuItem::Play(mode) => {
                        // Failure is recorded as a notice on the menu.
                        let _ = self.start_mode(mode);
                    }
                    MenuItem::Language => {
                        let selected = Language::ALL
                            .iter()
                            .position(|l| *l == self.language)
                            .unwrap_or(0);
                        self.screen = Screen::LanguageSelect { selected };
                    }
                },
                InputEvent::Char(_) => {}
            },
            Screen::LanguageSelect { selected } => match event {
                InputEvent::Escape => self.screen = Screen::MainMenu { selected: 3 },
                InputEvent::Up => *selected = step(*selected, Language::ALL.len(), false),
                InputEvent::Down => *selected = step(*selected, Language::ALL.len(), true),
                InputEvent::Enter => {
                    let language = Language::ALL[*selected];
                    self.set_language(language);
                    self.screen = Screen::MainMenu { selected: 3 };
                }
                InputEvent::Char(_) => {}
            },
            Screen::Playing(controller) => match event {
                InputEvent::Escape => {
                    let selected = menu_index(controller.mode());
                    self.screen = Screen::MainMenu { selected };
                }
                InputEvent::Enter => {
                    controller.on_reset_trigger();
                }
                InputEvent::Char(c) => {
                    if controller.accepts_guesses() {
                        controller.on_guess(c);
                    } else {
                        controller.on_reset_trigger();
                    }
                }
                InputEvent::Up | InputEvent::Down => {}
            },
        }
        AppControl::Continue
    }

    #[must_use]
    pub fn view(&self) -> View {
        match &self.screen {
            Screen::MainMenu { selected } => View::Menu(MenuView {
                title: "HANGMAN".to_string(),
                items: MenuItem::MAIN
                    .iter()
                    .map(|item| match item {
                        MenuItem::Play(mode) => format!("{mode} Mode"),
                        MenuItem::Language => format!("Language: {}", self.language),
                    })
                    .collect(),
                selected: *selected,
                notice: self.notice.clone(),
                footer: "UP/DOWN: Select | ENTER: Confirm | ESC: Quit".to_string(),
            }),
            Screen::LanguageSelect { selected } => View::Menu(MenuView {
                title: "SELECT LANGUAGE".to_string(),
                items: Language::ALL.iter().map(ToString::to_string).collect(),
                selected: *selected,
                notice: None,
                footer: "UP/DOWN: Select | ENTER: Confirm | ESC: Back".to_string(),
            }),
            Screen::Playing(controller) => View::Game(controller.render_model()),
        }
    }
}

fn menu_index(mode: Mode) -> usize {
    MenuItem::MAIN
        .iter()
        .position(|item| *item == MenuItem::Play(mode))
        .unwrap_or(0)
}

fn step(selected: usize, len: usize, forward: bool) -> usize {
    if forward {
        (selected + 1) % len
    } else {
        (selected + len - 1) % len
    }
}
