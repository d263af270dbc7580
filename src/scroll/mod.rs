//! Continuous scrolling: the chapter document, visibility tracking and
//! preloading

pub mod document;
pub mod preload;
pub mod rate;
pub mod tracker;

pub use document::{BlockExtent, Document, Position, RenderedChapterBlock};
pub use preload::{PreloadMessage, PreloadScheduler, PreloadTiming, Viewport};
pub use rate::{Debounce, Throttle};
pub use tracker::{PositionChange, ScrollTracker, nearest_to_center};
