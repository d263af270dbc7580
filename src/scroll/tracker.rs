//! Which chapter is "current" while scrolling through many

use crate::events::ChangeKind;

use super::document::{BlockExtent, Document, Position};

/// Index of the extent whose centre is nearest the viewport centre.
///
/// Distances are compared with a strict `<` in document order, so on a tie
/// the earlier block wins.
pub fn nearest_to_center(
    extents: &[BlockExtent],
    scroll_offset: usize,
    viewport_height: usize,
) -> Option<usize> {
    let viewport_center = scroll_offset as f64 + viewport_height as f64 / 2.0;
    let mut best: Option<(usize, f64)> = None;

    for (i, extent) in extents.iter().enumerate() {
        let distance = (extent.center() - viewport_center).abs();
        if best.is_none_or(|(_, d)| distance < d) {
            best = Some((i, distance));
        }
    }

    best.map(|(i, _)| i)
}

/// A change of the centred chapter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionChange {
    pub position: Position,
    pub kind: ChangeKind,
}

/// Remembers the last reported position and reports only changes
#[derive(Debug, Default)]
pub struct ScrollTracker {
    last: Option<Position>,
}

impl ScrollTracker {
    /// Forget history and start from `position`
    pub fn reset(&mut self, position: Option<Position>) {
        self.last = position;
    }

    /// Last reported position
    pub fn last(&self) -> Option<&Position> {
        self.last.as_ref()
    }

    /// Evaluate the document at the given scroll state. Never scrolls or
    /// re-renders; only reports.
    pub fn observe(
        &mut self,
        document: &Document,
        scroll_offset: usize,
        viewport_height: usize,
    ) -> Option<PositionChange> {
        let extents = document.extents();
        let laid_out = extents.len().min(document.len());
        let index = nearest_to_center(&extents[..laid_out], scroll_offset, viewport_height)?;
        let block = &document.blocks()[index];

        if self.last.as_ref().is_some_and(|p| p.book == block.book && p.chapter == block.chapter) {
            return None;
        }

        let kind = match &self.last {
            Some(last) if last.book == block.book => ChangeKind::Chapter,
            Some(_) => ChangeKind::Book,
            None => ChangeKind::Chapter,
        };
        let position = block.position();
        self.last = Some(position.clone());
        Some(PositionChange { position, kind })
    }
}
