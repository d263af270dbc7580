//! Display preferences: layout mode, font size, font family

use ratatui::style::Modifier;
use serde::{Deserialize, Serialize};

/// How verses are laid out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Every verse in its own box
    #[default]
    Boxed,
    /// One line per verse, no box
    Plain,
    /// Verses run together like a printed page
    Continuous,
}

impl ViewMode {
    /// All modes in cycling order
    pub const ALL: [ViewMode; 3] = [ViewMode::Boxed, ViewMode::Plain, ViewMode::Continuous];

    /// Persisted key
    pub fn key(self) -> &'static str {
        match self {
            ViewMode::Boxed => "boxed",
            ViewMode::Plain => "plain",
            ViewMode::Continuous => "continuous",
        }
    }

    /// Parse a persisted key (case-insensitive)
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.key().eq_ignore_ascii_case(key.trim()))
    }

    /// Display name
    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Boxed => "Box View",
            ViewMode::Plain => "Plain View",
            ViewMode::Continuous => "Book View",
        }
    }

    /// The mode after this one
    pub fn next(self) -> Self {
        match self {
            ViewMode::Boxed => ViewMode::Plain,
            ViewMode::Plain => ViewMode::Continuous,
            ViewMode::Continuous => ViewMode::Boxed,
        }
    }
}

/// Reading size, in rem relative to the terminal's own font
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
    ExtraLarge,
}

impl FontSize {
    /// All sizes, smallest first
    pub const ALL: [FontSize; 4] =
        [FontSize::Small, FontSize::Medium, FontSize::Large, FontSize::ExtraLarge];

    /// Size in rem
    pub fn rem(self) -> f64 {
        match self {
            FontSize::Small => 0.9,
            FontSize::Medium => 1.0,
            FontSize::Large => 1.2,
            FontSize::ExtraLarge => 1.4,
        }
    }

    /// Display name
    pub fn label(self) -> &'static str {
        match self {
            FontSize::Small => "Small",
            FontSize::Medium => "Medium",
            FontSize::Large => "Large",
            FontSize::ExtraLarge => "XL",
        }
    }

    /// The allowed size closest to `rem`; ties go to the smaller size
    pub fn nearest(rem: f64) -> Self {
        if !rem.is_finite() {
            return Self::default();
        }
        let mut best = Self::ALL[0];
        for size in Self::ALL.into_iter().skip(1) {
            if (size.rem() - rem).abs() < (best.rem() - rem).abs() {
                best = size;
            }
        }
        best
    }

    /// One step larger, saturating
    pub fn larger(self) -> Self {
        let i = Self::ALL.iter().position(|s| *s == self).unwrap_or(1);
        Self::ALL[(i + 1).min(Self::ALL.len() - 1)]
    }

    /// One step smaller, saturating
    pub fn smaller(self) -> Self {
        let i = Self::ALL.iter().position(|s| *s == self).unwrap_or(1);
        Self::ALL[i.saturating_sub(1)]
    }

    /// Columns available for text at this size.
    ///
    /// A terminal cannot change its glyph size, so larger sizes narrow the
    /// reading column instead, keeping roughly the same characters per line a
    /// larger font would give.
    pub fn text_width(self, columns: usize) -> usize {
        let scaled = (columns as f64 / self.rem()).floor() as usize;
        scaled.clamp(columns.min(16), columns)
    }
}

/// Face used for verse text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    #[default]
    Serif,
    Sans,
    Mono,
    Custom,
}

impl FontFamily {
    /// All families in cycling order
    pub const ALL: [FontFamily; 4] =
        [FontFamily::Serif, FontFamily::Sans, FontFamily::Mono, FontFamily::Custom];

    /// Persisted key
    pub fn key(self) -> &'static str {
        match self {
            FontFamily::Serif => "serif",
            FontFamily::Sans => "sans",
            FontFamily::Mono => "mono",
            FontFamily::Custom => "custom",
        }
    }

    /// Parse a persisted key (case-insensitive)
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key().eq_ignore_ascii_case(key.trim()))
    }

    /// Display name
    pub fn label(self) -> &'static str {
        match self {
            FontFamily::Serif => "Serif",
            FontFamily::Sans => "Sans",
            FontFamily::Mono => "Mono",
            FontFamily::Custom => "Georgia",
        }
    }

    /// Terminal approximation of the face
    pub fn modifier(self) -> Modifier {
        match self {
            FontFamily::Serif => Modifier::empty(),
            FontFamily::Sans => Modifier::BOLD,
            FontFamily::Mono => Modifier::DIM,
            FontFamily::Custom => Modifier::ITALIC,
        }
    }

    /// The family after this one
    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }
}

/// Inline style override carried by rendered verse text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextStyle {
    pub font_size: FontSize,
    pub font_family: FontFamily,
}

/// Every user-adjustable display preference
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// Verse layout
    pub view_mode: ViewMode,
    /// Reading size
    pub font_size: FontSize,
    /// Verse text face
    pub font_family: FontFamily,
    /// Palette name
    pub theme: String,
    /// Load further chapters as the reader nears the end
    pub continuous_scroll: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            view_mode: ViewMode::default(),
            font_size: FontSize::default(),
            font_family: FontFamily::default(),
            theme: crate::theme::DEFAULT_THEME.to_string(),
            continuous_scroll: false,
        }
    }
}

impl ViewState {
    /// Style override for verse text
    pub fn text_style(&self) -> TextStyle {
        TextStyle { font_size: self.font_size, font_family: self.font_family }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn arbitrary_size_snaps_to_nearest() {
        assert_eq!(FontSize::nearest(1.15), FontSize::Large);
        assert_eq!(FontSize::nearest(0.5), FontSize::Small);
        assert_eq!(FontSize::nearest(3.0), FontSize::ExtraLarge);
        assert_eq!(FontSize::nearest(1.0), FontSize::Medium);
    }

    #[test]
    fn non_finite_size_falls_back_to_default() {
        assert_eq!(FontSize::nearest(f64::NAN), FontSize::Medium);
        assert_eq!(FontSize::nearest(f64::INFINITY), FontSize::Medium);
    }

    #[test]
    fn size_steps_saturate() {
        assert_eq!(FontSize::Small.smaller(), FontSize::Small);
        assert_eq!(FontSize::ExtraLarge.larger(), FontSize::ExtraLarge);
        assert_eq!(FontSize::Medium.larger(), FontSize::Large);
    }

    #[test]
    fn larger_size_narrows_text_column() {
        assert_eq!(FontSize::Medium.text_width(80), 80);
        assert_eq!(FontSize::ExtraLarge.text_width(84), 60);
        assert_eq!(FontSize::Small.text_width(90), 90);
        assert_eq!(FontSize::ExtraLarge.text_width(10), 10);
    }

    #[test]
    fn view_mode_keys_round_trip() {
        for mode in ViewMode::ALL {
            assert_eq!(ViewMode::from_key(mode.key()), Some(mode));
        }
        assert_eq!(ViewMode::from_key("Grid"), None);
        assert_eq!(ViewMode::Continuous.next(), ViewMode::Boxed);
    }

    #[test]
    fn font_family_cycles() {
        assert_eq!(FontFamily::Custom.next(), FontFamily::Serif);
        assert_eq!(FontFamily::from_key("MONO"), Some(FontFamily::Mono));
    }

    proptest! {
        #[test]
        fn nearest_is_always_an_allowed_size(rem in -10.0f64..10.0) {
            let snapped = FontSize::nearest(rem);
            let best = FontSize::ALL
                .iter()
                .map(|s| (s.rem() - rem).abs())
                .fold(f64::INFINITY, f64::min);
            prop_assert!(((snapped.rem() - rem).abs() - best).abs() < 1e-12);
        }
    }
}
