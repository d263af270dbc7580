//! Application state and event handling

pub mod command;
pub mod event;
pub mod input;
pub mod state;

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, MouseEvent, MouseEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::bible::{BookIndex, BookSource, ContentError};
use crate::config::Config;
use crate::events::{ChangeKind, ReaderEvent};
use crate::reader::{Reader, ReaderChannels};
use crate::scroll::{PreloadMessage, PreloadTiming};
use crate::ui;
use command::{Command, ParseResult, parse_command};
use event::{AppEvent, spawn_event_reader};
use input::{Action, is_vim_motion, key_with_modifier_to_action};
use state::{AppState, CommandMode, Panel, Screen};

/// How often the event reader reports idle time
const TICK_RATE: Duration = Duration::from_millis(100);

/// Lines moved per mouse wheel step
const WHEEL_LINES: isize = 3;

/// Something the main loop woke up for
enum Incoming {
    Terminal(AppEvent),
    Preload(PreloadMessage),
    Reader(ReaderEvent),
}

/// The main application
pub struct App {
    /// Application configuration
    config: Config,

    /// Current application state
    state: AppState,

    /// Reading context
    reader: Reader,

    /// Preload results and reader notifications
    channels: ReaderChannels,

    /// Terminal backend
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl App {
    /// Create a new application instance
    pub fn new(config: Config, source: BookSource) -> Result<Self> {
        let (reader, channels) = Reader::new(
            source,
            Config::settings_store(),
            BookIndex::canonical(),
            PreloadTiming::default(),
        );
        let terminal = Self::setup_terminal()?;

        Ok(Self { config, state: AppState::default(), reader, channels, terminal })
    }

    /// Set up the terminal for TUI rendering
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    /// Restore the terminal to its original state
    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Run the application main loop
    pub async fn run(&mut self) -> Result<()> {
        // Set up panic hook to restore terminal
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
            original_hook(panic_info);
        }));

        let mut terminal_events = spawn_event_reader(TICK_RATE);

        let initial = self.config.initial_book.clone();
        self.open_book(&initial).await;

        loop {
            // Draw UI
            self.terminal.draw(|frame| {
                ui::draw(frame, &mut self.state, &mut self.reader);
            })?;

            let incoming = tokio::select! {
                Some(event) = terminal_events.recv() => Incoming::Terminal(event),
                Some(message) = self.channels.preload.recv() => Incoming::Preload(message),
                Some(event) = self.channels.events.recv() => Incoming::Reader(event),
                else => break,
            };

            let now = Instant::now();
            match incoming {
                Incoming::Terminal(AppEvent::Key(key)) => match self.handle_key(key, now).await {
                    Ok(true) => break, // Exit requested
                    Ok(false) => {}
                    Err(e) => tracing::error!("Error handling key: {}", e),
                },
                Incoming::Terminal(AppEvent::Mouse(mouse)) => self.handle_mouse(mouse),
                Incoming::Terminal(AppEvent::Resize(..) | AppEvent::Tick) => {}
                Incoming::Preload(message) => self.reader.apply_preload(message),
                Incoming::Reader(event) => self.on_reader_event(event, now),
            }

            self.housekeeping(now).await;
        }

        self.restore_terminal()?;
        Ok(())
    }

    /// Work done after every wake-up: timers, scroll tracking, queued jumps
    async fn housekeeping(&mut self, now: Instant) {
        if self.state.search.pending.fire_if_due(now) {
            self.run_search().await;
        }
        self.state.command_line.expire_message(now);

        if let Some(target) = self.reader.take_scroll_target() {
            self.state.content.scroll_offset = target;
        }
        if !self.state.search.is_showing() {
            self.reader.tick(self.state.content.viewport(), now);
        }
    }

    fn on_reader_event(&mut self, event: ReaderEvent, now: Instant) {
        match event {
            ReaderEvent::PositionChanged { book, chapter, kind: ChangeKind::Book } => {
                self.state.command_line.set_toast(format!("{book} {chapter}"), now);
            }
            ReaderEvent::PositionChanged { .. } => {}
            ReaderEvent::ChapterPreloaded { book, chapter }
            | ReaderEvent::BookPreloaded { book, chapter } => {
                tracing::debug!("Appended {} {}", book, chapter);
            }
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollDown => self.scroll_by(WHEEL_LINES),
            MouseEventKind::ScrollUp => self.scroll_by(-WHEEL_LINES),
            _ => {}
        }
    }

    /// Handle a key press, returns true if should exit
    async fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Result<bool> {
        if self.state.screen == Screen::Help {
            // Any key closes help
            self.state.screen = Screen::Main;
            return Ok(false);
        }

        if self.state.command_line.is_input_mode() {
            return self.handle_input_key(key, now).await;
        }

        if !self.config.vim_mode && key.modifiers.is_empty() && is_vim_motion(key.code) {
            return Ok(false);
        }

        let Some(action) = key_with_modifier_to_action(key.code, key.modifiers) else {
            return Ok(false);
        };

        if self.state.focused_panel == Panel::Books && self.handle_books_action(action).await {
            return Ok(false);
        }

        let page = self.state.content.visible_height.max(2) as isize;
        match action {
            Action::Down => self.scroll_by(1),
            Action::Up => self.scroll_by(-1),
            Action::PageDown => self.scroll_by(page - 1),
            Action::PageUp => self.scroll_by(-(page - 1)),
            Action::HalfPageDown => self.scroll_by(page / 2),
            Action::HalfPageUp => self.scroll_by(-(page / 2)),
            Action::Top => self.scroll_by(isize::MIN),
            Action::Bottom => self.scroll_by(isize::MAX),
            Action::NextChapter => {
                self.state.search.close();
                if let Some(chapter) = self.reader.next_chapter().await {
                    self.state.command_line.set_toast(format!("Chapter {chapter}"), now);
                }
            }
            Action::PrevChapter => {
                self.state.search.close();
                if let Some(chapter) = self.reader.prev_chapter().await {
                    self.state.command_line.set_toast(format!("Chapter {chapter}"), now);
                }
            }
            Action::CycleView => {
                let mode = self.reader.view().view_mode.next();
                self.reader.set_view_mode(mode).await;
                self.state.command_line.set_toast(mode.label(), now);
            }
            Action::FontLarger | Action::FontSmaller => {
                let current = self.reader.view().font_size;
                let size =
                    if action == Action::FontLarger { current.larger() } else { current.smaller() };
                self.reader.set_font_size(size);
                self.state.command_line.set_toast(format!("Font size: {}", size.label()), now);
            }
            Action::CycleFont => {
                let family = self.reader.view().font_family.next();
                self.reader.set_font_family(family);
                self.state.command_line.set_toast(format!("Font: {}", family.label()), now);
            }
            Action::CycleTheme => {
                let theme = self.reader.theme().next();
                self.reader.set_theme(theme.name);
                self.state.command_line.set_toast(format!("Theme: {}", theme.name), now);
            }
            Action::ToggleContinuous => {
                let enabled = !self.reader.view().continuous_scroll;
                self.reader.set_continuous_scroll(enabled, now).await;
                let label = if enabled { "Continuous scrolling on" } else { "Continuous scrolling off" };
                self.state.command_line.set_toast(label, now);
            }
            Action::ToggleBooks => self.toggle_books(),
            Action::Back => {
                if self.state.search.is_showing() {
                    self.state.search.close();
                }
            }
            Action::Search => self.state.command_line.enter_search_mode(),
            Action::Command => self.state.command_line.enter_command_mode(),
            Action::Help => self.state.screen = Screen::Help,
            Action::Quit => return Ok(true),
            Action::Select => {}
        }

        Ok(false)
    }

    /// Handle an action while the book picker has focus; `false` lets the
    /// content panel handle it
    async fn handle_books_action(&mut self, action: Action) -> bool {
        let len = ui::books::visible_books(self.reader.catalog(), &self.state.books).len();
        let page = self.state.books.visible_height.max(2) as isize;

        match action {
            Action::Down => self.state.books.move_selection(1, len),
            Action::Up => self.state.books.move_selection(-1, len),
            Action::PageDown | Action::HalfPageDown => self.state.books.move_selection(page - 1, len),
            Action::PageUp | Action::HalfPageUp => self.state.books.move_selection(-(page - 1), len),
            Action::Top => self.state.books.move_selection(isize::MIN, len),
            Action::Bottom => self.state.books.move_selection(isize::MAX, len),
            Action::Select => {
                let books = ui::books::visible_books(self.reader.catalog(), &self.state.books);
                if let Some(name) = books.get(self.state.books.selected_index).copied() {
                    self.state.focused_panel = Panel::Content;
                    self.state.books.visible = false;
                    self.open_book(name).await;
                }
            }
            Action::Back => {
                if self.state.books.filter.is_empty() {
                    self.toggle_books();
                } else {
                    self.state.books.set_filter("");
                }
            }
            _ => return false,
        }
        true
    }

    /// Handle a key while the command line is taking input
    async fn handle_input_key(&mut self, key: KeyEvent, now: Instant) -> Result<bool> {
        let mode = self.state.command_line.mode;
        let line = &mut self.state.command_line;

        match key.code {
            KeyCode::Esc => {
                line.exit_input_mode();
                if mode == CommandMode::Search {
                    if self.state.focused_panel == Panel::Books {
                        self.state.books.set_filter("");
                    } else {
                        self.state.search.close();
                    }
                }
                return Ok(false);
            }
            KeyCode::Enter => {
                let input = line.input.clone();
                line.exit_input_mode();
                return match mode {
                    CommandMode::Command => {
                        line.add_to_history(input.clone());
                        self.execute_command(&input, now).await
                    }
                    CommandMode::Search => {
                        if self.state.focused_panel != Panel::Books {
                            self.state.search.query = input;
                            self.run_search().await;
                        }
                        Ok(false)
                    }
                    CommandMode::Normal => Ok(false),
                };
            }
            KeyCode::Backspace => line.delete_char(),
            KeyCode::Delete => line.delete_char_forward(),
            KeyCode::Left => line.move_left(),
            KeyCode::Right => line.move_right(),
            KeyCode::Home => line.move_start(),
            KeyCode::End => line.move_end(),
            KeyCode::Up if mode == CommandMode::Command => line.history_up(),
            KeyCode::Down if mode == CommandMode::Command => line.history_down(),
            KeyCode::Char(c) => line.insert_char(c),
            _ => return Ok(false),
        }

        if mode == CommandMode::Search {
            let input = self.state.command_line.input.clone();
            if self.state.focused_panel == Panel::Books {
                self.state.books.set_filter(&input);
            } else if input.is_empty() {
                // Empty query returns to the chapter
                self.state.search.query.clear();
                self.state.search.close();
            } else {
                self.state.search.query = input;
                self.state.search.pending.schedule(now);
            }
        }
        Ok(false)
    }

    /// Parse and run a `:` command, returns true if should exit
    async fn execute_command(&mut self, input: &str, now: Instant) -> Result<bool> {
        let command = match parse_command(input) {
            ParseResult::Ok(command) => command,
            ParseResult::UnknownCommand(cmd) => {
                self.state.command_line.set_error(format!("Unknown command: {cmd}"));
                return Ok(false);
            }
            ParseResult::MissingArgument(cmd) => {
                self.state.command_line.set_error(format!(":{cmd} needs an argument"));
                return Ok(false);
            }
            ParseResult::InvalidArgument { command, argument } => {
                self.state.command_line.set_error(format!("Invalid argument for :{command}: {argument}"));
                return Ok(false);
            }
        };

        match command {
            Command::Book(name) => self.open_book(&name).await,
            Command::Chapter(chapter) => {
                self.state.search.close();
                if !self.reader.select_chapter(chapter).await {
                    let book = self.reader.position().map(|p| p.book.clone()).unwrap_or_default();
                    self.state.command_line.set_error(format!("{book} has no chapter {chapter}"));
                }
            }
            Command::View(mode) => {
                self.reader.set_view_mode(mode).await;
                self.state.command_line.set_message(mode.label());
            }
            Command::FontSize(size) => {
                self.reader.set_font_size(size);
                self.state.command_line.set_message(format!("Font size: {}", size.label()));
            }
            Command::Font(family) => {
                self.reader.set_font_family(family);
                self.state.command_line.set_message(format!("Font: {}", family.label()));
            }
            Command::Theme(name) => {
                if self.reader.set_theme(&name) {
                    self.state.command_line.set_message(format!("Theme: {}", self.reader.view().theme));
                } else {
                    self.state.command_line.set_error(format!("Unknown theme: {name}"));
                }
            }
            Command::Scroll(enabled) => {
                self.reader.set_continuous_scroll(enabled, now).await;
                let label = if enabled { "Continuous scrolling on" } else { "Continuous scrolling off" };
                self.state.command_line.set_message(label);
            }
            Command::Books => {
                self.state.books.visible = true;
                self.state.focused_panel = Panel::Books;
            }
            Command::Help => self.state.screen = Screen::Help,
            Command::Quit => return Ok(true),
            Command::Nop => self.state.command_line.clear_message(),
        }
        Ok(false)
    }

    /// Open a book at chapter 1, reporting failures on the command line
    async fn open_book(&mut self, name: &str) {
        self.state.search.close();
        match self.reader.select_book(name).await {
            Ok(()) => {
                self.state.load_error = None;
                self.state.command_line.clear_message();
            }
            Err(ContentError::UnknownBook(name)) => {
                self.state.command_line.set_error(format!("Unknown book: {name}"));
            }
            Err(e) => {
                if self.reader.document().is_empty() {
                    self.state.load_error = Some(e.to_string());
                }
                self.state.command_line.set_error(load_failure_message(name, &e));
            }
        }
    }

    /// Run the current search query against the book on screen
    async fn run_search(&mut self) {
        self.state.search.pending.cancel();
        let query = self.state.search.query.clone();
        if query.is_empty() {
            self.state.search.close();
            return;
        }
        let hits = self.reader.search(&query).await;
        tracing::debug!("{} hits for {:?}", hits.len(), query);
        self.state.search.results = Some(hits);
        self.state.search.scroll_offset = 0;
    }

    fn toggle_books(&mut self) {
        let picker = &mut self.state.books;
        picker.visible = !picker.visible;
        self.state.focused_panel = if picker.visible { Panel::Books } else { Panel::Content };
    }

    /// Scroll whichever view is showing
    fn scroll_by(&mut self, delta: isize) {
        if self.state.search.is_showing() {
            let offset = &mut self.state.search.scroll_offset;
            *offset = offset.saturating_add_signed(delta);
        } else {
            self.state.content.scroll_by(delta);
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = self.restore_terminal();
    }
}

/// Status line text for a book that failed to open
fn load_failure_message(name: &str, error: &ContentError) -> String {
    if error.is_not_found() {
        format!("{name} is not available from this source")
    } else if error.is_recoverable() {
        format!("Could not load {name}, try again: {error}")
    } else {
        format!("Could not load {name}: {error}")
    }
}
