//! UI rendering components

pub mod books;
pub mod command_line;
pub mod content;
pub mod help;
pub mod main_screen;
pub mod navigator;
pub mod verses;

use ratatui::Frame;

use crate::app::state::{AppState, Screen};
use crate::reader::Reader;

/// Main draw function
pub fn draw(frame: &mut Frame, state: &mut AppState, reader: &mut Reader) {
    let theme = reader.theme();

    main_screen::draw(frame, state, reader, &theme);
    if state.screen == Screen::Help {
        help::draw(frame, &theme);
    }
}
