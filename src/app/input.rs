//! Event handling utilities

use crossterm::event::{KeyCode, KeyModifiers};

/// Vim-style key mapping (basic, without modifiers)
pub fn vim_key_to_action(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Char('j') | KeyCode::Down => Some(Action::Down),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::Up),
        KeyCode::Char('h') | KeyCode::Left => Some(Action::PrevChapter),
        KeyCode::Char('l') | KeyCode::Right => Some(Action::NextChapter),
        KeyCode::Char('g') | KeyCode::Home => Some(Action::Top),
        KeyCode::Char('G') | KeyCode::End => Some(Action::Bottom),
        KeyCode::Char('d') | KeyCode::PageDown => Some(Action::PageDown),
        KeyCode::Char('u') | KeyCode::PageUp => Some(Action::PageUp),
        KeyCode::Enter => Some(Action::Select),
        KeyCode::Esc => Some(Action::Back),
        KeyCode::Char('/') => Some(Action::Search),
        KeyCode::Char(':') => Some(Action::Command),
        KeyCode::Char('?') => Some(Action::Help),
        // Note: 'q' intentionally not mapped - use :q command to quit
        // Reading settings
        KeyCode::Char('v') => Some(Action::CycleView),
        KeyCode::Char('+') | KeyCode::Char('=') => Some(Action::FontLarger),
        KeyCode::Char('-') => Some(Action::FontSmaller),
        KeyCode::Char('f') => Some(Action::CycleFont),
        KeyCode::Char('t') => Some(Action::CycleTheme),
        KeyCode::Char('c') => Some(Action::ToggleContinuous),
        // Panels
        KeyCode::Char('b') => Some(Action::ToggleBooks),
        _ => None,
    }
}

/// Letters that only move the view when vim mode is on
pub fn is_vim_motion(key: KeyCode) -> bool {
    matches!(key, KeyCode::Char('j' | 'k' | 'h' | 'l' | 'g' | 'G' | 'd' | 'u'))
}

/// Key mapping with modifiers (for Ctrl combinations)
pub fn key_with_modifier_to_action(key: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
    if modifiers.contains(KeyModifiers::CONTROL) {
        match key {
            KeyCode::Char('d') => Some(Action::HalfPageDown),
            KeyCode::Char('u') => Some(Action::HalfPageUp),
            KeyCode::Char('f') => Some(Action::PageDown),
            KeyCode::Char('b') => Some(Action::PageUp),
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        }
    } else {
        vim_key_to_action(key)
    }
}

/// Actions that can be taken in the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Navigation
    Up,
    Down,
    Top,
    Bottom,
    PageUp,
    PageDown,
    HalfPageUp,
    HalfPageDown,
    PrevChapter,
    NextChapter,

    // Selection
    Select,
    Back,

    // Input modes
    Search,
    Command,

    // Reading settings
    CycleView,
    FontLarger,
    FontSmaller,
    CycleFont,
    CycleTheme,
    ToggleContinuous,

    // Panel management
    ToggleBooks,

    Help,
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vim_j_maps_to_down() {
        assert_eq!(vim_key_to_action(KeyCode::Char('j')), Some(Action::Down));
    }

    #[test]
    fn arrows_are_not_vim_motions() {
        assert!(is_vim_motion(KeyCode::Char('j')));
        assert!(!is_vim_motion(KeyCode::Down));
        assert!(!is_vim_motion(KeyCode::Char('v')));
    }

    #[test]
    fn vim_k_maps_to_up() {
        assert_eq!(vim_key_to_action(KeyCode::Char('k')), Some(Action::Up));
    }

    #[test]
    fn h_and_l_change_chapter() {
        assert_eq!(vim_key_to_action(KeyCode::Char('h')), Some(Action::PrevChapter));
        assert_eq!(vim_key_to_action(KeyCode::Right), Some(Action::NextChapter));
    }

    #[test]
    fn unknown_key_returns_none() {
        assert_eq!(vim_key_to_action(KeyCode::Char('x')), None);
        assert_eq!(vim_key_to_action(KeyCode::Char('q')), None);
    }

    #[test]
    fn plus_and_equals_enlarge_text() {
        assert_eq!(vim_key_to_action(KeyCode::Char('+')), Some(Action::FontLarger));
        assert_eq!(vim_key_to_action(KeyCode::Char('=')), Some(Action::FontLarger));
        assert_eq!(vim_key_to_action(KeyCode::Char('-')), Some(Action::FontSmaller));
    }

    #[test]
    fn ctrl_d_half_page_down() {
        assert_eq!(
            key_with_modifier_to_action(KeyCode::Char('d'), KeyModifiers::CONTROL),
            Some(Action::HalfPageDown)
        );
    }

    #[test]
    fn ctrl_c_quits() {
        assert_eq!(
            key_with_modifier_to_action(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Some(Action::Quit)
        );
    }

    #[test]
    fn no_modifier_uses_vim_keys() {
        assert_eq!(
            key_with_modifier_to_action(KeyCode::Char('c'), KeyModifiers::NONE),
            Some(Action::ToggleContinuous)
        );
    }
}
