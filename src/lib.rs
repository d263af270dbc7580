//! Lectio - A calm terminal Bible reader
//!
//! Lectio reads one book of scripture at a time from static JSON files and
//! keeps appending the following chapters, and then the following books, as
//! you scroll.

pub mod app;
pub mod bible;
pub mod config;
pub mod events;
pub mod reader;
pub mod scroll;
pub mod theme;
pub mod ui;
pub mod view;

pub use app::App;
pub use config::Config;
pub use reader::Reader;
pub use theme::Theme;
