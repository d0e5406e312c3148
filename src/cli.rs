use crate::app::{App, AppControl, InputEvent, MenuView, View};
use crate::clock::Clock;
use crate::letters::{ALPHABET_SIZE, Letter};
use crate::render::{Presenter, RenderModel, gallows};
use crate::round::KeyMark;
use crate::session::Mode;
use crate::wordbank::Language;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Hangman in the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Word list language
    #[arg(short = 'l', long = "language", value_enum, default_value_t = Language::English)]
    pub language: Language,

    /// Directory holding words_en.txt / words_ro.txt
    #[arg(short = 'w', long = "words-dir")]
    pub words_dir: Option<PathBuf>,

    /// Use the word lists compiled into the binary
    #[arg(long = "builtin-words", conflicts_with = "words_dir")]
    pub builtin_words: bool,

    /// Skip the menu and start in this mode
    #[arg(short = 'm', long = "mode", value_enum)]
    pub mode: Option<Mode>,

    /// Line-based interface instead of the full-screen one
    #[arg(long = "plain")]
    pub plain: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// UI Input/Output functions

pub enum LineInput {
    Events(Vec<InputEvent>),
    Exit,
}

/// Maps one line of plain input to key events.
///
/// `exit` quits, `menu` is Escape, `up`/`down` move the selection and an
/// empty line is Enter. Anything else is typed key by key.
#[must_use]
pub fn parse_line(line: &str) -> LineInput {
    let trimmed = line.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "exit" => LineInput::Exit,
        "menu" => LineInput::Events(vec![InputEvent::Escape]),
        "up" => LineInput::Events(vec![InputEvent::Up]),
        "down" => LineInput::Events(vec![InputEvent::Down]),
        "" => LineInput::Events(vec![InputEvent::Enter]),
        _ => LineInput::Events(
            trimmed
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(InputEvent::Char)
                .collect(),
        ),
    }
}

/// Returns `None` at end of input.
pub fn read_line<R: BufRead>(reader: &mut R) -> io::Result<Option<LineInput>> {
    let mut input = String::new();
    if reader.read_line(&mut input)? == 0 {
        return Ok(None);
    }
    Ok(Some(parse_line(&input)))
}

fn keyboard_summary(keys: &[KeyMark; ALPHABET_SIZE]) -> (String, String) {
    let mut hits = Vec::new();
    let mut misses = Vec::new();
    for letter in Letter::all() {
        match keys[letter.index()] {
            KeyMark::Hit => hits.push(letter.to_string()),
            KeyMark::Miss => misses.push(letter.to_string()),
            KeyMark::Unused => {}
        }
    }
    (hits.join(" "), misses.join(" "))
}

/// Line-oriented presenter writing to any [`Write`].
pub struct CliPresenter<W: Write> {
    writer: W,
}

impl<W: Write> CliPresenter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    pub fn render_menu(&mut self, menu: &MenuView) -> io::Result<()> {
        writeln!(self.writer, "\n== {} ==", menu.title)?;
        for (i, item) in menu.items.iter().enumerate() {
            let marker = if i == menu.selected { '>' } else { ' ' };
            writeln!(self.writer, "{marker} {item}")?;
        }
        if let Some(notice) = &menu.notice {
            writeln!(self.writer, "! {notice}")?;
        }
        writeln!(
            self.writer,
            "(up/down to move, empty line to confirm, 'menu' to go back, 'exit' to quit)"
        )?;
        self.writer.flush()
    }

    pub fn render_view(&mut self, view: &View) -> io::Result<()> {
        match view {
            View::Menu(menu) => self.render_menu(menu),
            View::Game(model) => self.render_round_model(model),
        }
    }
}

impl<W: Write> Presenter for CliPresenter<W> {
    fn render_round_model(&mut self, model: &RenderModel) -> io::Result<()> {
        writeln!(self.writer, "\n== {} ==", model.title)?;
        if let Some(subtitle) = &model.subtitle {
            writeln!(self.writer, "{subtitle}")?;
        }
        for player in &model.players {
            let marker = if model.players.len() > 1 && player.is_active {
                " <"
            } else {
                ""
            };
            writeln!(self.writer, "\n{}{marker}", player.label)?;
            for line in gallows(player.wrong_guesses) {
                writeln!(self.writer, "{line}")?;
            }
            writeln!(self.writer, "Word: {}", player.display_mask)?;
            let mut status = format!(
                "Wrong: {}/{}",
                player.wrong_guesses, player.max_wrong_guesses
            );
            if let Some(timer) = &player.timer {
                status.push_str(&format!("  Time: {}", timer.text));
                if timer.is_low {
                    status.push('!');
                }
            }
            if let Some(words) = player.words_won {
                status.push_str(&format!("  Words: {words}"));
            }
            writeln!(self.writer, "{status}")?;
            if model.show_keyboard {
                let (hits, misses) = keyboard_summary(&player.keyboard);
                writeln!(self.writer, "Hits: {hits}  Misses: {misses}")?;
            }
        }
        if let Some(banner) = &model.banner {
            writeln!(self.writer, "\n*** {} ***", banner.text)?;
            if let Some(detail) = &banner.detail {
                writeln!(self.writer, "{detail}")?;
            }
        }
        writeln!(self.writer, "{}", model.prompt)?;
        self.writer.flush()
    }
}

/// Drives `app` from lines of text until `exit`, Escape on the main menu or
/// end of input.
pub fn run_plain<C, R, W>(app: &mut App<C>, mut reader: R, writer: W) -> io::Result<W>
where
    C: Clock + Clone,
    R: BufRead,
    W: Write,
{
    let mut presenter = CliPresenter::new(writer);
    presenter.render_view(&app.view())?;
    while let Some(line) = read_line(&mut reader)? {
        app.tick();
        let events = match line {
            LineInput::Exit => break,
            LineInput::Events(events) => events,
        };
        let mut quit = false;
        for event in events {
            if app.handle(event) == AppControl::Quit {
                quit = true;
                break;
            }
            app.tick();
        }
        if quit {
            break;
        }
        presenter.render_view(&app.view())?;
    }
    writeln!(presenter.writer, "Goodbye.")?;
    presenter.writer.flush()?;
    Ok(presenter.into_inner())
}
