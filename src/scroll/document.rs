//! The scrollable document: rendered chapter blocks in display order

use crate::view::{Fragment, TextStyle};

/// A (book, chapter) reading position
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    pub book: String,
    pub chapter: u32,
}

impl Position {
    pub fn new(book: impl Into<String>, chapter: u32) -> Self {
        Self { book: book.into(), chapter }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.book, self.chapter)
    }
}

/// Rendered content tagged with the chapter it shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedChapterBlock {
    pub book: String,
    pub chapter: u32,
    pub fragment: Fragment,
}

impl RenderedChapterBlock {
    pub fn new(book: impl Into<String>, chapter: u32, fragment: Fragment) -> Self {
        Self { book: book.into(), chapter, fragment }
    }

    /// Position this block shows
    pub fn position(&self) -> Position {
        Position::new(self.book.clone(), self.chapter)
    }
}

/// Vertical extent of a laid-out block, in terminal lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockExtent {
    pub top: usize,
    pub height: usize,
}

impl BlockExtent {
    /// Vertical centre
    pub fn center(&self) -> f64 {
        self.top as f64 + self.height as f64 / 2.0
    }
}

/// Chapter blocks plus their extents from the most recent layout pass
#[derive(Debug, Default)]
pub struct Document {
    blocks: Vec<RenderedChapterBlock>,
    extents: Vec<BlockExtent>,
}

impl Document {
    /// All blocks in display order
    pub fn blocks(&self) -> &[RenderedChapterBlock] {
        &self.blocks
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Drop every block
    pub fn clear(&mut self) {
        self.blocks.clear();
        self.extents.clear();
    }

    /// Tear down and show only `block`
    pub fn replace_with(&mut self, block: RenderedChapterBlock) {
        self.clear();
        self.blocks.push(block);
    }

    /// Append a block; returns `false` if that chapter is already present
    pub fn append(&mut self, block: RenderedChapterBlock) -> bool {
        if self.contains(&block.book, block.chapter) {
            return false;
        }
        self.blocks.push(block);
        true
    }

    /// Whether a block for this chapter is attached
    pub fn contains(&self, book: &str, chapter: u32) -> bool {
        self.blocks.iter().any(|b| b.book == book && b.chapter == chapter)
    }

    /// Position of the last block
    pub fn tail(&self) -> Option<Position> {
        self.blocks.last().map(RenderedChapterBlock::position)
    }

    /// Apply a new font override to every block without re-rendering
    pub fn restyle(&mut self, style: TextStyle) {
        for block in &mut self.blocks {
            block.fragment.restyle(style);
        }
    }

    /// Record block extents computed by the layout pass
    pub fn set_extents(&mut self, extents: Vec<BlockExtent>) {
        self.extents = extents;
    }

    /// Extents from the last layout pass; may cover fewer blocks than exist
    pub fn extents(&self) -> &[BlockExtent] {
        &self.extents
    }
}
