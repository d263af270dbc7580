//! View layer: display preferences and the verse renderer

pub mod render;
pub mod style;

pub use render::{Fragment, Header, HeaderKind, Row, VerseRun, render, render_with_header};
pub use style::{FontFamily, FontSize, TextStyle, ViewMode, ViewState};
