//! TUI (Terminal User Interface) module for Hangman
//!
//! This module provides the full-screen interface using Ratatui.
//!
//! # Architecture
//! - `TuiInterface`: owns the terminal, polls keys and draws whatever the
//!   [`App`] currently shows
//! - `map_key`: turns crossterm key events into front-end neutral
//!   [`InputEvent`]s
//!
//! The loop ticks the app on every poll timeout so running clocks and
//! delayed round transitions advance without input.

use crate::app::{App, AppControl, InputEvent, MenuView, View};
use crate::clock::Clock;
use crate::letters::Letter;
use crate::render::{Banner, PlayerView, Presenter, RenderModel, Tone, gallows};
use crate::round::{KeyMark, Outcome};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;
const KEYBOARD_ROWS: [&str; 3] = ["ABCDEFGHI", "JKLMNOPQR", "STUVWXYZ"];

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);
const WORD_STYLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);
const SELECTED_STYLE: Style = Style::new()
    .fg(Color::Black)
    .bg(Color::Cyan)
    .add_modifier(Modifier::BOLD);

fn key_colors(mark: KeyMark) -> (Color, Color) {
    match mark {
        KeyMark::Unused => (Color::DarkGray, Color::White),
        KeyMark::Hit => (Color::Green, Color::Black),
        KeyMark::Miss => (Color::Red, Color::White),
    }
}

fn tone_style(tone: Tone) -> Style {
    match tone {
        Tone::Info => INFO_STYLE,
        Tone::Success => SUCCESS_STYLE,
        Tone::Failure => ERROR_STYLE,
    }
}

/// Translates a key press into an app event.
///
/// Releases and repeats are dropped, as are keys held with Alt or Control and
/// the garbage characters some terminals emit on focus changes.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<InputEvent> {
    if key.kind != event::KeyEventKind::Press {
        return None;
    }
    if key.modifiers.intersects(KeyModifiers::ALT | KeyModifiers::CONTROL) {
        debug_log!("map_key() - Ignoring key with modifier: {:?}", key.modifiers);
        return None;
    }
    match key.code {
        KeyCode::Char(c) if c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD => {
            debug_log!("map_key() - Ignoring invalid character: {:?}", c);
            None
        }
        KeyCode::Char(c) => Some(InputEvent::Char(c)),
        KeyCode::Enter => Some(InputEvent::Enter),
        KeyCode::Esc => Some(InputEvent::Escape),
        KeyCode::Up => Some(InputEvent::Up),
        KeyCode::Down => Some(InputEvent::Down),
        _ => None,
    }
}

/// Main TUI interface component.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete: raw mode, alternate screen, cursor hidden");
        Ok(Self { terminal })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    /// Runs until the app asks to quit.
    pub fn run<C: Clock + Clone>(&mut self, app: &mut App<C>) -> Result<(), io::Error> {
        loop {
            app.tick();
            let view = app.view();
            self.terminal.draw(|f| render_static(f, &view))?;

            if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
                continue;
            }
            let Event::Key(key) = event::read()? else {
                continue;
            };
            let Some(input) = map_key(key) else {
                continue;
            };
            debug_log!("run() - Input: {:?}", input);
            app.tick();
            if app.handle(input) == AppControl::Quit {
                info_log!("run() - Quit requested");
                return Ok(());
            }
        }
    }
}

impl Presenter for TuiInterface {
    fn render_round_model(&mut self, model: &RenderModel) -> io::Result<()> {
        self.terminal.draw(|f| {
            let area = f.area();
            render_game(f, area, model);
        })?;
        Ok(())
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

/// Render the complete UI for a view.
pub fn render_static(f: &mut Frame, view: &View) {
    let area = f.area();
    match view {
        View::Menu(menu) => render_menu(f, area, menu),
        View::Game(model) => render_game(f, area, model),
    }
}

fn render_title(f: &mut Frame, area: Rect, title: &str) {
    let title = Paragraph::new(title)
        .style(HEADER_STYLE)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

fn render_instructions(f: &mut Frame, area: Rect, text: &str) {
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn render_menu(f: &mut Frame, area: Rect, menu: &MenuView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(6),    // Items
            Constraint::Length(3), // Notice
            Constraint::Length(3), // Instructions
        ])
        .split(area);

    render_title(f, chunks[0], &menu.title);

    let lines: Vec<Line> = menu
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            if i == menu.selected {
                Line::from(Span::styled(format!(" > {item} "), SELECTED_STYLE))
            } else {
                Line::from(format!("   {item} "))
            }
        })
        .collect();
    let items = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(items, chunks[1]);

    let notice = Paragraph::new(menu.notice.as_deref().unwrap_or(""))
        .style(ERROR_STYLE)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(notice, chunks[2]);

    render_instructions(f, chunks[3], &menu.footer);
}

fn render_game(f: &mut Frame, area: Rect, model: &RenderModel) {
    let keyboard_height = if model.show_keyboard { 5 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),               // Title
            Constraint::Min(14),                 // Players
            Constraint::Length(4),               // Banner
            Constraint::Length(keyboard_height), // Keyboard
            Constraint::Length(3),               // Instructions
        ])
        .split(area);

    let title = match &model.subtitle {
        Some(subtitle) => format!("{} | {subtitle}", model.title),
        None => model.title.clone(),
    };
    render_title(f, chunks[0], &title);

    let player_count = u32::try_from(model.players.len().max(1)).unwrap_or(1);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints((0..player_count).map(|_| Constraint::Ratio(1, player_count)))
        .split(chunks[1]);
    let highlight_active = model.players.len() > 1;
    for (player, column) in model.players.iter().zip(columns.iter()) {
        render_player(f, *column, player, highlight_active);
    }

    render_banner(f, chunks[2], model.banner.as_ref());
    if model.show_keyboard
        && let Some(player) = model.players.first()
    {
        render_keyboard(f, chunks[3], player);
    }
    render_instructions(f, chunks[4], &model.prompt);
}

fn render_player(f: &mut Frame, area: Rect, player: &PlayerView, highlight_active: bool) {
    let mut lines: Vec<Line> = gallows(player.wrong_guesses)
        .into_iter()
        .map(Line::from)
        .collect();
    lines.push(Line::from(""));

    let word_style = match player.outcome {
        Outcome::InProgress => WORD_STYLE,
        Outcome::Won => SUCCESS_STYLE,
        Outcome::Lost => ERROR_STYLE,
    };
    lines.push(Line::from(Span::styled(player.display_mask.clone(), word_style)));
    lines.push(Line::from(""));
    lines.push(Line::from(format!(
        "Wrong: {}/{}",
        player.wrong_guesses, player.max_wrong_guesses
    )));
    if let Some(timer) = &player.timer {
        let style = if timer.is_low { ERROR_STYLE } else { MESSAGE_STYLE };
        lines.push(Line::from(vec![
            Span::raw("Time: "),
            Span::styled(timer.text.clone(), style),
        ]));
    }
    if let Some(words) = player.words_won {
        lines.push(Line::from(format!("Words: {words}")));
    }

    let mut block = Block::default().borders(Borders::ALL).title(player.label.clone());
    if highlight_active && player.is_active {
        block = block
            .border_style(INFO_STYLE)
            .title(Span::styled(" <- TURN ", INFO_STYLE));
    }
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(block);
    f.render_widget(paragraph, area);
}

fn render_banner(f: &mut Frame, area: Rect, banner: Option<&Banner>) {
    let mut lines = Vec::new();
    if let Some(banner) = banner {
        lines.push(Line::from(Span::styled(
            banner.text.clone(),
            tone_style(banner.tone),
        )));
        if let Some(detail) = &banner.detail {
            lines.push(Line::from(Span::styled(detail.clone(), MESSAGE_STYLE)));
        }
    }
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn render_keyboard(f: &mut Frame, area: Rect, player: &PlayerView) {
    let lines: Vec<Line> = KEYBOARD_ROWS
        .iter()
        .map(|row| {
            let mut spans = Vec::new();
            for letter in row.chars().filter_map(Letter::from_char) {
                let (bg_color, fg_color) = key_colors(player.keyboard[letter.index()]);
                spans.push(Span::styled(
                    format!(" {letter} "),
                    Style::default().fg(fg_color).bg(bg_color),
                ));
                spans.push(Span::raw(" "));
            }
            Line::from(spans)
        })
        .collect();
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Letters"));
    f.render_widget(paragraph, area);
}
