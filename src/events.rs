//! Reader notifications
//!
//! Components publish typed [`ReaderEvent`]s on an [`EventBus`] instead of
//! calling into the UI. The app loop is the only subscriber.

use tokio::sync::mpsc;

/// What changed when the visible position moved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// A different book scrolled into the centre
    Book,
    /// Same book, different chapter
    Chapter,
}

/// Events published by the reader
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReaderEvent {
    /// The chapter considered current changed while scrolling
    PositionChanged { book: String, chapter: u32, kind: ChangeKind },
    /// A chapter of the current book was appended by the preloader
    ChapterPreloaded { book: String, chapter: u32 },
    /// The first chapter of a following book was appended by the preloader
    BookPreloaded { book: String, chapter: u32 },
}

/// Publishing side of the reader's event channel
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: mpsc::UnboundedSender<ReaderEvent>,
}

impl EventBus {
    /// Create a bus and its receiving end
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ReaderEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Publish an event; dropped silently once nobody listens
    pub fn publish(&self, event: ReaderEvent) {
        if self.tx.send(event).is_err() {
            tracing::trace!("Reader event dropped, no subscriber");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn published_events_arrive_in_order() {
        let (bus, mut rx) = EventBus::channel();
        bus.publish(ReaderEvent::ChapterPreloaded { book: "Ruth".into(), chapter: 2 });
        bus.publish(ReaderEvent::BookPreloaded { book: "Esther".into(), chapter: 1 });

        assert_eq!(
            rx.try_recv().unwrap(),
            ReaderEvent::ChapterPreloaded { book: "Ruth".into(), chapter: 2 }
        );
        assert!(matches!(rx.try_recv().unwrap(), ReaderEvent::BookPreloaded { .. }));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn publishing_without_subscriber_is_harmless() {
        let (bus, rx) = EventBus::channel();
        drop(rx);
        bus.publish(ReaderEvent::ChapterPreloaded { book: "Ruth".into(), chapter: 2 });
    }
}
