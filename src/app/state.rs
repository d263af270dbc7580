//! Application state definitions

use std::time::{Duration, Instant};

use crate::bible::SearchHit;
use crate::scroll::{Debounce, Viewport};

/// Delay between the last keystroke of a search and running it
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Which screen is currently displayed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Main,
    Help,
}

/// Which panel is currently focused
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Panel {
    Books,
    #[default]
    Content,
}

/// State for the book picker
#[derive(Debug, Clone, Default)]
pub struct BookPickerState {
    /// Whether the picker is shown
    pub visible: bool,
    /// Selected index into the filtered list
    pub selected_index: usize,
    /// Case-insensitive name filter
    pub filter: String,
    /// Scroll offset for long lists
    pub scroll_offset: usize,
    /// Visible height in items (updated on render)
    pub visible_height: usize,
}

impl BookPickerState {
    /// Ensure the selected item is visible by adjusting scroll offset
    pub fn ensure_selection_visible(&mut self) {
        // Don't scroll past the selection (top)
        if self.selected_index < self.scroll_offset {
            self.scroll_offset = self.selected_index;
        }
        // Don't let selection go below visible area (bottom)
        let visible = self.visible_height.saturating_sub(2);
        if visible > 0 && self.selected_index >= self.scroll_offset + visible {
            self.scroll_offset = self.selected_index.saturating_sub(visible) + 1;
        }
    }

    /// Move the selection by `delta`, staying within `len` items
    pub fn move_selection(&mut self, delta: isize, len: usize) {
        if len == 0 {
            self.selected_index = 0;
            return;
        }
        let target = self.selected_index.saturating_add_signed(delta);
        self.selected_index = target.min(len - 1);
        self.ensure_selection_visible();
    }

    /// Replace the filter and start again from the top
    pub fn set_filter(&mut self, filter: &str) {
        self.filter = filter.to_string();
        self.selected_index = 0;
        self.scroll_offset = 0;
    }
}

/// State for content rendering
#[derive(Debug, Clone, Default)]
pub struct ContentState {
    /// Current scroll position (lines from top)
    pub scroll_offset: usize,
    /// Total rendered lines (updated on render)
    pub total_lines: usize,
    /// Visible height in lines (updated on render)
    pub visible_height: usize,
}

impl ContentState {
    /// Get the maximum allowed scroll offset
    pub fn max_scroll(&self) -> usize {
        self.total_lines.saturating_sub(self.visible_height / 2)
    }

    /// Clamp scroll offset to valid range
    pub fn clamp_scroll(&mut self) {
        let max = self.max_scroll();
        if self.scroll_offset > max {
            self.scroll_offset = max;
        }
    }

    /// Scroll by `delta` lines, clamped
    pub fn scroll_by(&mut self, delta: isize) {
        self.scroll_offset = self.scroll_offset.saturating_add_signed(delta);
        self.clamp_scroll();
    }

    /// Scroll state as the reader sees it
    pub fn viewport(&self) -> Viewport {
        Viewport {
            offset: self.scroll_offset,
            height: self.visible_height,
            document_height: self.total_lines,
        }
    }
}

/// State for verse search
#[derive(Debug, Clone)]
pub struct SearchState {
    /// Query the results belong to
    pub query: String,
    /// Hits for `query`; `None` while the chapter view is shown
    pub results: Option<Vec<SearchHit>>,
    /// Scroll position in the results list
    pub scroll_offset: usize,
    /// Pending run of the query being typed
    pub pending: Debounce,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            query: String::new(),
            results: None,
            scroll_offset: 0,
            pending: Debounce::new(SEARCH_DEBOUNCE),
        }
    }
}

impl SearchState {
    /// Whether the results view replaces the chapter view
    pub fn is_showing(&self) -> bool {
        self.results.is_some()
    }

    /// Return to the chapter view
    pub fn close(&mut self) {
        self.results = None;
        self.scroll_offset = 0;
        self.pending.cancel();
    }
}

/// Command line mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CommandMode {
    /// Normal mode - command line hidden or showing status
    #[default]
    Normal,
    /// Command mode - accepting : commands
    Command,
    /// Search mode - accepting / search queries
    Search,
}

/// State for the command line input
#[derive(Debug, Clone, Default)]
pub struct CommandLineState {
    /// Current mode
    pub mode: CommandMode,
    /// Input buffer
    pub input: String,
    /// Cursor position in input
    pub cursor: usize,
    /// Status/error message to display (when not in input mode)
    pub message: Option<String>,
    /// Whether message is an error
    pub is_error: bool,
    /// When a transient message disappears
    pub message_expires: Option<Instant>,
    /// Command history
    pub history: Vec<String>,
    /// Current history index when navigating
    pub history_index: Option<usize>,
}

impl CommandLineState {
    /// Start command mode
    pub fn enter_command_mode(&mut self) {
        self.mode = CommandMode::Command;
        self.input.clear();
        self.cursor = 0;
        self.message = None;
        self.history_index = None;
    }

    /// Start search mode
    pub fn enter_search_mode(&mut self) {
        self.mode = CommandMode::Search;
        self.input.clear();
        self.cursor = 0;
        self.message = None;
        self.history_index = None;
    }

    /// Exit input mode
    pub fn exit_input_mode(&mut self) {
        self.mode = CommandMode::Normal;
        self.input.clear();
        self.cursor = 0;
    }

    /// Set a status message
    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.is_error = false;
        self.message_expires = None;
    }

    /// Set a status message that clears itself after [`Self::TOAST_DURATION`]
    pub fn set_toast(&mut self, msg: impl Into<String>, now: Instant) {
        self.set_message(msg);
        self.message_expires = Some(now + Self::TOAST_DURATION);
    }

    /// Set an error message
    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.is_error = true;
        self.message_expires = None;
    }

    /// Clear the message
    pub fn clear_message(&mut self) {
        self.message = None;
        self.message_expires = None;
    }

    /// Drop a transient message whose time is up
    pub fn expire_message(&mut self, now: Instant) {
        if self.message_expires.is_some_and(|at| now >= at) {
            self.clear_message();
        }
    }

    /// How long a toast stays on screen
    pub const TOAST_DURATION: Duration = Duration::from_millis(1500);

    /// Convert character index to byte index
    fn char_to_byte_index(&self, char_idx: usize) -> usize {
        self.input.char_indices().nth(char_idx).map(|(i, _)| i).unwrap_or(self.input.len())
    }

    /// Get the number of characters in input
    fn char_count(&self) -> usize {
        self.input.chars().count()
    }

    /// Insert a character at cursor (cursor is character index)
    pub fn insert_char(&mut self, c: char) {
        let byte_idx = self.char_to_byte_index(self.cursor);
        self.input.insert(byte_idx, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn delete_char(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let byte_idx = self.char_to_byte_index(self.cursor);
            self.input.remove(byte_idx);
        }
    }

    /// Delete character at cursor
    pub fn delete_char_forward(&mut self) {
        if self.cursor < self.char_count() {
            let byte_idx = self.char_to_byte_index(self.cursor);
            self.input.remove(byte_idx);
        }
    }

    /// Move cursor left
    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// Move cursor right
    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    /// Move cursor to start
    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    /// Move cursor to end
    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    /// Check if we're in input mode
    pub fn is_input_mode(&self) -> bool {
        matches!(self.mode, CommandMode::Command | CommandMode::Search)
    }

    /// Maximum number of history entries to keep
    const MAX_HISTORY: usize = 1000;

    /// Add to history
    pub fn add_to_history(&mut self, cmd: String) {
        if !cmd.is_empty() && self.history.last() != Some(&cmd) {
            if self.history.len() >= Self::MAX_HISTORY {
                self.history.remove(0);
            }
            self.history.push(cmd);
        }
    }

    /// Navigate history up
    pub fn history_up(&mut self) {
        if self.history.is_empty() {
            return;
        }
        match self.history_index {
            None => {
                self.history_index = Some(self.history.len() - 1);
            }
            Some(i) if i > 0 => {
                self.history_index = Some(i - 1);
            }
            _ => {}
        }
        if let Some(i) = self.history_index {
            self.input = self.history[i].clone();
            self.cursor = self.char_count();
        }
    }

    /// Navigate history down
    pub fn history_down(&mut self) {
        if let Some(i) = self.history_index {
            if i + 1 < self.history.len() {
                self.history_index = Some(i + 1);
                self.input = self.history[i + 1].clone();
                self.cursor = self.char_count();
            } else {
                self.history_index = None;
                self.input.clear();
                self.cursor = 0;
            }
        }
    }
}

/// Full application state
#[derive(Debug, Default)]
pub struct AppState {
    /// Current screen
    pub screen: Screen,

    /// Currently focused panel
    pub focused_panel: Panel,

    /// Book picker state
    pub books: BookPickerState,

    /// Content rendering state
    pub content: ContentState,

    /// Search state
    pub search: SearchState,

    /// Command line state
    pub command_line: CommandLineState,

    /// Why the last user-initiated load failed, shown in place of content
    pub load_error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_expires() {
        let now = Instant::now();
        let mut line = CommandLineState::default();
        line.set_toast("Chapter 3", now);

        line.expire_message(now + Duration::from_millis(100));
        assert_eq!(line.message.as_deref(), Some("Chapter 3"));

        line.expire_message(now + CommandLineState::TOAST_DURATION);
        assert!(line.message.is_none());
    }

    #[test]
    fn plain_messages_do_not_expire() {
        let now = Instant::now();
        let mut line = CommandLineState::default();
        line.set_error("Unknown command: foo");
        line.expire_message(now + Duration::from_secs(60));
        assert!(line.is_error);
        assert!(line.message.is_some());
    }

    #[test]
    fn history_skips_consecutive_duplicates() {
        let mut line = CommandLineState::default();
        line.add_to_history("book Ruth".into());
        line.add_to_history("book Ruth".into());
        line.add_to_history("chapter 2".into());
        assert_eq!(line.history, vec!["book Ruth", "chapter 2"]);

        line.history_up();
        assert_eq!(line.input, "chapter 2");
        line.history_up();
        assert_eq!(line.input, "book Ruth");
        line.history_down();
        assert_eq!(line.input, "chapter 2");
    }

    #[test]
    fn picker_selection_stays_in_range() {
        let mut picker = BookPickerState { visible_height: 6, ..Default::default() };
        picker.move_selection(-1, 66);
        assert_eq!(picker.selected_index, 0);

        picker.move_selection(10, 66);
        assert_eq!(picker.selected_index, 10);
        assert!(picker.scroll_offset > 0);

        picker.move_selection(100, 66);
        assert_eq!(picker.selected_index, 65);

        picker.set_filter("john");
        assert_eq!((picker.selected_index, picker.scroll_offset), (0, 0));
    }

    #[test]
    fn content_scroll_is_clamped() {
        let mut content = ContentState { total_lines: 100, visible_height: 20, ..Default::default() };
        content.scroll_by(500);
        assert_eq!(content.scroll_offset, 90);
        content.scroll_by(-1000);
        assert_eq!(content.scroll_offset, 0);
    }
}
