//! The reader context
//!
//! [`Reader`] owns everything the reading view needs: the content store, the
//! persisted view settings, the scrollable document, the canonical reading
//! [`Position`] and the continuous-scroll machinery. It is built once when the
//! app starts and every user action goes through it.

use std::time::{Duration, Instant};

use tokio::sync::mpsc;

use crate::bible::{BookIndex, BookSource, ContentError, ContentStore, SearchHit};
use crate::config::SettingsStore;
use crate::events::{ChangeKind, EventBus, ReaderEvent};
use crate::scroll::preload::INITIAL_DELAY;
use crate::scroll::{
    Debounce, Document, Position, PositionChange, PreloadMessage, PreloadScheduler, PreloadTiming,
    RenderedChapterBlock, ScrollTracker, Throttle, Viewport,
};
use crate::theme::Theme;
use crate::view::{FontFamily, FontSize, Header, ViewMode, ViewState, render_with_header};

/// Minimum gap between two visibility checks
pub const TRACK_INTERVAL: Duration = Duration::from_millis(150);

/// Receiving ends the app loop listens on
#[derive(Debug)]
pub struct ReaderChannels {
    pub preload: mpsc::UnboundedReceiver<PreloadMessage>,
    pub events: mpsc::UnboundedReceiver<ReaderEvent>,
}

#[derive(Debug, Default)]
struct CycleState {
    anchor: Option<Position>,
    appended: usize,
    /// Anchor of the last cycle that found nothing to add
    exhausted: Option<Position>,
}

/// Reading state and the services acting on it
#[derive(Debug)]
pub struct Reader {
    store: ContentStore,
    settings: SettingsStore,
    view: ViewState,
    catalog: BookIndex,
    document: Document,
    position: Option<Position>,
    tracker: ScrollTracker,
    scheduler: PreloadScheduler,
    events: EventBus,
    throttle: Throttle,
    initial_preload: Debounce,
    cycle: CycleState,
    scroll_target: Option<usize>,
}

impl Reader {
    /// Create a reader; settings are restored from `settings`
    pub fn new(
        source: BookSource,
        settings: SettingsStore,
        catalog: BookIndex,
        timing: PreloadTiming,
    ) -> (Self, ReaderChannels) {
        let (preload_tx, preload_rx) = mpsc::unbounded_channel();
        let (events, events_rx) = EventBus::channel();
        let view = settings.load();

        let mut scheduler = PreloadScheduler::new(catalog, preload_tx).with_timing(timing);
        if view.continuous_scroll {
            scheduler.attach();
        }

        let reader = Self {
            store: ContentStore::new(source),
            settings,
            view,
            catalog,
            document: Document::default(),
            position: None,
            tracker: ScrollTracker::default(),
            scheduler,
            events,
            throttle: Throttle::new(TRACK_INTERVAL),
            initial_preload: Debounce::new(INITIAL_DELAY),
            cycle: CycleState::default(),
            scroll_target: None,
        };
        (reader, ReaderChannels { preload: preload_rx, events: events_rx })
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn catalog(&self) -> &BookIndex {
        &self.catalog
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Record block extents from the latest layout pass
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// The canonical (book, chapter) pair
    pub fn position(&self) -> Option<&Position> {
        self.position.as_ref()
    }

    /// Chapter count of the book at the current position
    pub fn chapter_count(&self) -> usize {
        match (&self.position, self.store.book()) {
            (Some(position), Some(book)) if position.book == book.name => book.chapter_count(),
            (Some(position), _) => self
                .scheduler
                .cached(&position.book)
                .map_or(0, |book| book.chapter_count()),
            (None, _) => self.store.chapter_count(),
        }
    }

    /// Whether a preload cycle is running
    pub fn is_loading(&self) -> bool {
        self.scheduler.is_loading()
    }

    pub fn theme(&self) -> Theme {
        Theme::by_name(&self.view.theme)
    }

    /// Line the view should jump to, if an action asked for one
    pub fn take_scroll_target(&mut self) -> Option<usize> {
        self.scroll_target.take()
    }

    /// Open `name` at chapter 1
    pub async fn select_book(&mut self, name: &str) -> Result<(), ContentError> {
        let resolved = self
            .catalog
            .resolve(name)
            .ok_or_else(|| ContentError::UnknownBook(name.to_string()))?;

        if let Err(e) = self.store.load_book(resolved).await {
            tracing::error!("Failed to load {}: {}", resolved, e);
            return Err(e);
        }
        // The store now matches; pin the position so select_chapter does not sync back
        self.position = Some(Position::new(resolved, 1));
        self.select_chapter(1).await;
        Ok(())
    }

    /// Show chapter `number` of the current book on its own.
    ///
    /// Returns `false` (leaving the view alone) if there is no such chapter.
    pub async fn select_chapter(&mut self, number: u32) -> bool {
        self.sync_store().await;

        let mode = self.view.view_mode;
        let style = self.view.text_style();
        let Some(book) = self.store.book_name().map(str::to_string) else {
            return false;
        };
        let Some(verses) = self.store.verses_of(number) else {
            tracing::debug!("{} has no chapter {}", book, number);
            return false;
        };
        let fragment = render_with_header(Header::for_chapter(&book, number), verses, mode, style);

        self.teardown();
        self.document.replace_with(RenderedChapterBlock::new(book.clone(), number, fragment));

        let position = Position::new(book, number);
        self.tracker.reset(Some(position.clone()));
        self.position = Some(position);
        self.scroll_target = Some(0);
        true
    }

    /// Move to the following chapter; `None` at the last one
    pub async fn next_chapter(&mut self) -> Option<u32> {
        let current = self.position.as_ref()?.chapter;
        self.sync_store().await;
        if current as usize >= self.store.chapter_count() {
            return None;
        }
        let next = current + 1;
        self.select_chapter(next).await.then_some(next)
    }

    /// Move to the preceding chapter; `None` at chapter 1
    pub async fn prev_chapter(&mut self) -> Option<u32> {
        let current = self.position.as_ref()?.chapter;
        if current <= 1 {
            return None;
        }
        let prev = current - 1;
        self.select_chapter(prev).await.then_some(prev)
    }

    /// Switch layouts; the current chapter is re-rendered on its own
    pub async fn set_view_mode(&mut self, mode: ViewMode) {
        if self.view.view_mode == mode {
            return;
        }
        self.view.view_mode = mode;
        self.settings.save(&self.view);
        tracing::info!("View mode set to {}", mode.key());

        let Some(position) = self.position.clone() else {
            return;
        };
        if self.select_chapter(position.chapter).await {
            // Re-rendered in place; the view keeps its scroll offset
            self.scroll_target = None;
        }
    }

    pub fn set_font_size(&mut self, size: FontSize) {
        if self.view.font_size == size {
            return;
        }
        self.view.font_size = size;
        self.document.restyle(self.view.text_style());
        self.settings.save(&self.view);
    }

    pub fn set_font_family(&mut self, family: FontFamily) {
        if self.view.font_family == family {
            return;
        }
        self.view.font_family = family;
        self.document.restyle(self.view.text_style());
        self.settings.save(&self.view);
    }

    /// Select a palette by name; `false` if no palette has that name
    pub fn set_theme(&mut self, name: &str) -> bool {
        let Some(theme) = Theme::find(name) else {
            return false;
        };
        self.view.theme = theme.name.to_string();
        self.settings.save(&self.view);
        true
    }

    /// Turn continuous scrolling on or off.
    ///
    /// Switching on schedules a first preload shortly after; switching off
    /// drops every preloaded chapter and shows the current one on its own.
    pub async fn set_continuous_scroll(&mut self, enabled: bool, now: Instant) {
        if self.view.continuous_scroll == enabled {
            return;
        }
        self.view.continuous_scroll = enabled;
        self.settings.save(&self.view);

        if enabled {
            tracing::info!("Continuous scrolling enabled");
            self.scheduler.attach();
            self.initial_preload.schedule(now);
        } else {
            tracing::info!("Continuous scrolling disabled");
            self.scheduler.detach();
            self.initial_preload.cancel();
            if let Some(position) = self.position.clone() {
                self.select_chapter(position.chapter).await;
            }
        }
    }

    /// React to the view scrolling
    pub fn on_scroll(&mut self, viewport: Viewport, now: Instant) {
        if !self.scheduler.is_attached() {
            return;
        }
        if self.throttle.ready(now) {
            self.track(viewport);
        }
        self.maybe_preload(viewport);
    }

    /// Periodic housekeeping from the app's tick
    pub fn tick(&mut self, viewport: Viewport, now: Instant) {
        if self.initial_preload.fire_if_due(now)
            && self.scheduler.is_attached()
            && !self.scheduler.is_loading()
        {
            if let Some(anchor) = self.document.tail() {
                self.start_preload(anchor);
            }
        }
        self.on_scroll(viewport, now);
    }

    fn track(&mut self, viewport: Viewport) {
        let Some(PositionChange { position, kind }) =
            self.tracker.observe(&self.document, viewport.offset, viewport.height)
        else {
            return;
        };

        if kind == ChangeKind::Book {
            tracing::info!("Scrolled into {}", position.book);
        }
        self.events.publish(ReaderEvent::PositionChanged {
            book: position.book.clone(),
            chapter: position.chapter,
            kind,
        });
        self.position = Some(position);
    }

    fn maybe_preload(&mut self, viewport: Viewport) {
        if !self.scheduler.should_trigger(&viewport) {
            return;
        }
        let Some(anchor) = self.document.tail() else {
            return;
        };
        if self.cycle.exhausted.as_ref() == Some(&anchor) {
            return;
        }
        self.start_preload(anchor);
    }

    fn start_preload(&mut self, anchor: Position) {
        self.cycle.anchor = Some(anchor.clone());
        self.cycle.appended = 0;
        self.scheduler.start(
            anchor,
            self.store.snapshot(),
            self.store.source().clone(),
            self.view.view_mode,
            self.view.text_style(),
        );
    }

    /// Apply a message from a preload task
    pub fn apply_preload(&mut self, message: PreloadMessage) {
        match message {
            PreloadMessage::Block { generation, mut block, new_book } => {
                if !self.scheduler.accepts(generation) {
                    tracing::trace!("Dropping stale preload of {}", block.position());
                    return;
                }
                // The cycle rendered with the style it started under
                block.fragment.restyle(self.view.text_style());
                let (book, chapter) = (block.book.clone(), block.chapter);
                if !self.document.append(block) {
                    tracing::debug!("{} {} already in the document", book, chapter);
                    return;
                }
                self.cycle.appended += 1;
                self.events.publish(if new_book {
                    ReaderEvent::BookPreloaded { book, chapter }
                } else {
                    ReaderEvent::ChapterPreloaded { book, chapter }
                });
            }
            PreloadMessage::Finished { generation, books } => {
                if !self.scheduler.accepts(generation) {
                    return;
                }
                self.scheduler.finish(generation, books);
                if self.cycle.appended == 0 {
                    self.cycle.exhausted = self.cycle.anchor.take();
                }
            }
        }
    }

    /// Search the book at the current position
    pub async fn search(&mut self, query: &str) -> Vec<SearchHit> {
        self.sync_store().await;
        self.store.search(query)
    }

    /// Make the content store hold the book at the current position.
    ///
    /// Scrolling can carry the position into a preloaded book; the store
    /// follows lazily, before anything that reads from it.
    pub async fn sync_store(&mut self) {
        let Some(position) = &self.position else {
            return;
        };
        if self.store.book_name() == Some(position.book.as_str()) {
            return;
        }

        let name = position.book.clone();
        if let Some(book) = self.scheduler.cached(&name) {
            self.store.adopt(book);
        } else if let Err(e) = self.store.load_book(&name).await {
            tracing::warn!("Could not switch to {}: {}", name, e);
        }
    }

    fn teardown(&mut self) {
        self.scheduler.cancel();
        self.initial_preload.cancel();
        self.cycle = CycleState::default();
        self.document.clear();
    }
}
