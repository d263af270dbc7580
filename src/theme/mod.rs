//! Theming system for lectio
//!
//! Themes are selected by name. The reader offers six palettes; an unknown
//! name falls back to [`DEFAULT_THEME`].

mod palettes;

pub use palettes::{BLACK, DARK, GRAY, LIGHT, SEPIA, TAN};

use ratatui::style::Color;

/// Theme used when none is stored or the stored name is unknown
pub const DEFAULT_THEME: &str = "light";

/// A color theme for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,

    // Background colors
    pub bg_primary: Color,
    pub bg_secondary: Color,
    pub bg_tertiary: Color,

    // Foreground colors
    pub fg_primary: Color,
    pub fg_secondary: Color,
    pub fg_muted: Color,

    // Accent colors
    pub accent_primary: Color,
    pub accent_secondary: Color,

    // Semantic colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,

    // Reading
    pub verse_number: Color,
    pub highlight_bg: Color,
    pub highlight_fg: Color,

    // UI elements
    pub border: Color,
    pub border_focused: Color,
    pub selection: Color,
    pub cursor: Color,
}

impl Theme {
    /// Every palette, in cycling order
    pub const ALL: [Theme; 6] = [LIGHT, SEPIA, DARK, BLACK, TAN, GRAY];

    /// Palette called `name` (case-insensitive), if there is one
    pub fn find(name: &str) -> Option<Theme> {
        Self::ALL.into_iter().find(|t| t.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Palette called `name`, falling back to the default
    pub fn by_name(name: &str) -> Theme {
        Self::find(name).unwrap_or_default()
    }

    /// Names of every palette
    pub fn names() -> impl Iterator<Item = &'static str> {
        Self::ALL.into_iter().map(|t| t.name)
    }

    /// The palette after this one
    pub fn next(&self) -> Theme {
        let i = Self::ALL.iter().position(|t| t.name == self.name).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }
}

impl Default for Theme {
    fn default() -> Self {
        LIGHT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_theme_is_light() {
        assert_eq!(Theme::default().name, DEFAULT_THEME);
    }

    #[test]
    fn unknown_names_fall_back_to_light() {
        assert_eq!(Theme::by_name("solarized"), LIGHT);
        assert_eq!(Theme::by_name(""), LIGHT);
    }

    #[test]
    fn names_are_case_insensitive() {
        assert_eq!(Theme::by_name("Sepia"), SEPIA);
        assert_eq!(Theme::find(" GRAY "), Some(GRAY));
    }

    #[test]
    fn cycling_visits_every_palette() {
        let mut theme = LIGHT;
        let mut seen = vec![theme.name];
        for _ in 1..Theme::ALL.len() {
            theme = theme.next();
            seen.push(theme.name);
        }
        assert_eq!(seen, Theme::names().collect::<Vec<_>>());
        assert_eq!(theme.next(), LIGHT);
    }
}
