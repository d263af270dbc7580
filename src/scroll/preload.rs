//! Continuous-scroll preloading
//!
//! When the reader nears the end of the document the scheduler starts one
//! preload cycle: it plans the next chapters (crossing into the next book
//! when the current one runs out), then fetches and renders them on a
//! background task. Rendered blocks come back to the UI loop over a channel,
//! so only the UI loop ever touches the document.
//!
//! Cross-book planning never touches the content store. Planning starts from
//! an immutable [`Position`] and looks the next book up through its own
//! handle, so the reader's navigation state cannot drift while a cycle runs.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::bible::{Book, BookIndex, BookSource, ContentError};
use crate::view::{Header, TextStyle, ViewMode, render_with_header};

use super::document::{Position, RenderedChapterBlock};

/// Chapters queued per cycle
pub const LOOKAHEAD: usize = 2;

/// Trigger once the bottom of the viewport is within this many viewport
/// heights of the end of the document
pub const THRESHOLD: f64 = 0.75;

/// Delay before the first cycle after continuous scroll is switched on
pub const INITIAL_DELAY: Duration = Duration::from_millis(300);

/// Scroll state the trigger condition is evaluated against (in lines)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub offset: usize,
    pub height: usize,
    pub document_height: usize,
}

impl Viewport {
    /// `offset + height >= document_height - height * THRESHOLD`
    pub fn near_end(&self) -> bool {
        let bottom = (self.offset + self.height) as f64;
        bottom >= self.document_height as f64 - self.height as f64 * THRESHOLD
    }
}

/// Delays between the steps of a cycle
#[derive(Debug, Clone, Copy)]
pub struct PreloadTiming {
    /// Gap between successive fetches after the first
    pub stagger: Duration,
    /// Pause before the cycle reports completion
    pub grace: Duration,
}

impl Default for PreloadTiming {
    fn default() -> Self {
        Self { stagger: Duration::from_millis(200), grace: Duration::from_millis(100) }
    }
}

/// One chapter to fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreloadItem {
    pub book: String,
    pub chapter: u32,
    /// First chapters of a following book get a full header with divider
    pub new_book: bool,
}

impl PreloadItem {
    fn header(&self) -> Header {
        if self.new_book {
            Header::new_book(self.book.clone(), self.chapter)
        } else {
            Header::continuation(self.book.clone(), self.chapter)
        }
    }
}

/// Messages from a preload task to the UI loop
#[derive(Debug)]
pub enum PreloadMessage {
    /// A rendered chapter ready to append
    Block { generation: u64, block: RenderedChapterBlock, new_book: bool },
    /// The cycle is over; carries the books it fetched for reuse
    Finished { generation: u64, books: Vec<Arc<Book>> },
}

/// Books fetched while preloading, keyed by name
type BookCache = HashMap<String, Arc<Book>>;

async fn resolve_book(
    cache: &mut BookCache,
    source: &BookSource,
    name: &str,
) -> Result<Arc<Book>, ContentError> {
    if let Some(book) = cache.get(name) {
        return Ok(Arc::clone(book));
    }
    let book = Arc::new(source.fetch(name).await?);
    cache.insert(name.to_string(), Arc::clone(&book));
    Ok(book)
}

/// Plan up to `lookahead` chapters after `anchor`.
///
/// Chapters of `anchor_book` come first; if it runs out, the next catalog
/// book is looked up through `cache`/`source` and its first chapters fill the
/// rest of the queue. At the end of the corpus the queue is simply shorter.
pub async fn plan_queue(
    anchor: &Position,
    anchor_book: &Book,
    cache: &mut BookCache,
    source: &BookSource,
    catalog: &BookIndex,
    lookahead: usize,
) -> Vec<PreloadItem> {
    let mut queue = Vec::with_capacity(lookahead);
    let total = anchor_book.chapter_count() as u32;

    for step in 1..=lookahead as u32 {
        let next = anchor.chapter + step;
        if next <= total {
            queue.push(PreloadItem { book: anchor.book.clone(), chapter: next, new_book: false });
            continue;
        }

        let Some(next_book) = catalog.next(&anchor.book) else {
            tracing::debug!("End of corpus after {}", anchor.book);
            break;
        };

        match resolve_book(cache, source, next_book).await {
            Ok(book) => {
                let remaining = (lookahead - queue.len()) as u32;
                let available = book.chapter_count() as u32;
                for chapter in 1..=remaining.min(available) {
                    queue.push(PreloadItem { book: book.name.clone(), chapter, new_book: true });
                }
            }
            Err(e) => tracing::warn!("Could not look up {} for preloading: {}", next_book, e),
        }
        break;
    }

    queue
}

/// Sleep unless cancelled first; `false` means cancelled
async fn pause(cancel: &CancellationToken, duration: Duration) -> bool {
    tokio::select! {
        _ = cancel.cancelled() => false,
        _ = tokio::time::sleep(duration) => true,
    }
}

struct Cycle {
    generation: u64,
    anchor: Position,
    cache: BookCache,
    source: BookSource,
    catalog: BookIndex,
    mode: ViewMode,
    style: TextStyle,
    timing: PreloadTiming,
    lookahead: usize,
}

impl Cycle {
    async fn run(mut self, tx: mpsc::UnboundedSender<PreloadMessage>, cancel: CancellationToken) {
        let queue = match resolve_book(&mut self.cache, &self.source, &self.anchor.book).await {
            Ok(anchor_book) => {
                plan_queue(
                    &self.anchor,
                    &anchor_book,
                    &mut self.cache,
                    &self.source,
                    &self.catalog,
                    self.lookahead,
                )
                .await
            }
            Err(e) => {
                tracing::warn!("Could not load {} for preloading: {}", self.anchor.book, e);
                Vec::new()
            }
        };
        tracing::debug!("Preload cycle {} queued {:?}", self.generation, queue);

        for (i, item) in queue.iter().enumerate() {
            if i > 0 && !pause(&cancel, self.timing.stagger).await {
                return;
            }
            if cancel.is_cancelled() {
                return;
            }

            match self.render_item(item).await {
                Ok(block) => {
                    let message = PreloadMessage::Block {
                        generation: self.generation,
                        block,
                        new_book: item.new_book,
                    };
                    if tx.send(message).is_err() {
                        return;
                    }
                }
                Err(e) => {
                    tracing::warn!("Skipping preload of {} {}: {}", item.book, item.chapter, e)
                }
            }
        }

        if !pause(&cancel, self.timing.grace).await {
            return;
        }
        let books = self.cache.into_values().collect();
        let _ = tx.send(PreloadMessage::Finished { generation: self.generation, books });
    }

    async fn render_item(&mut self, item: &PreloadItem) -> Result<RenderedChapterBlock, String> {
        let book = resolve_book(&mut self.cache, &self.source, &item.book)
            .await
            .map_err(|e| e.to_string())?;
        let chapter = book
            .chapter(item.chapter)
            .ok_or_else(|| format!("{} has no chapter {}", book.name, item.chapter))?;
        let fragment = render_with_header(item.header(), &chapter.verses, self.mode, self.style);
        Ok(RenderedChapterBlock::new(book.name.clone(), item.chapter, fragment))
    }
}

/// Decides when to preload and owns the in-flight cycle
#[derive(Debug)]
pub struct PreloadScheduler {
    attached: bool,
    loading: bool,
    generation: u64,
    cancel: Option<CancellationToken>,
    /// Book the running cycle planned from
    anchor_book: Option<String>,
    books: BookCache,
    catalog: BookIndex,
    timing: PreloadTiming,
    lookahead: usize,
    tx: mpsc::UnboundedSender<PreloadMessage>,
}

impl PreloadScheduler {
    /// Create a detached scheduler that reports on `tx`
    pub fn new(catalog: BookIndex, tx: mpsc::UnboundedSender<PreloadMessage>) -> Self {
        Self {
            attached: false,
            loading: false,
            generation: 0,
            cancel: None,
            anchor_book: None,
            books: HashMap::new(),
            catalog,
            timing: PreloadTiming::default(),
            lookahead: LOOKAHEAD,
            tx,
        }
    }

    /// Override cycle timing
    pub fn with_timing(mut self, timing: PreloadTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Start reacting to scroll
    pub fn attach(&mut self) {
        self.attached = true;
    }

    /// Stop reacting to scroll and abandon any running cycle
    pub fn detach(&mut self) {
        self.attached = false;
        self.cancel();
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Whether a cycle is running
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Abandon the running cycle; its late messages will be ignored
    pub fn cancel(&mut self) {
        if let Some(token) = self.cancel.take() {
            token.cancel();
        }
        if self.loading {
            tracing::debug!("Preload cycle {} cancelled", self.generation);
        }
        self.loading = false;
        self.generation += 1;
    }

    /// Whether this scroll state should start a cycle
    pub fn should_trigger(&self, viewport: &Viewport) -> bool {
        self.attached && !self.loading && viewport.near_end()
    }

    /// Start a cycle planning from `anchor`. `current` is the loaded book, if
    /// the caller has one, so it does not have to be fetched again.
    pub fn start(
        &mut self,
        anchor: Position,
        current: Option<Arc<Book>>,
        source: BookSource,
        mode: ViewMode,
        style: TextStyle,
    ) -> u64 {
        if let Some(token) = self.cancel.take() {
            token.cancel();
        }
        self.loading = true;
        self.generation += 1;
        self.anchor_book = Some(anchor.book.clone());

        let mut cache = self.books.clone();
        if let Some(book) = current {
            cache.insert(book.name.clone(), book);
        }

        let token = CancellationToken::new();
        self.cancel = Some(token.clone());

        let cycle = Cycle {
            generation: self.generation,
            anchor,
            cache,
            source,
            catalog: self.catalog,
            mode,
            style,
            timing: self.timing,
            lookahead: self.lookahead,
        };
        tracing::debug!("Starting preload cycle {} after {}", cycle.generation, cycle.anchor);
        tokio::spawn(cycle.run(self.tx.clone(), token));

        self.generation
    }

    /// A book fetched by an earlier cycle
    pub fn cached(&self, name: &str) -> Option<Arc<Book>> {
        self.books.get(name).cloned()
    }

    /// Whether a message from `generation` should still be applied
    pub fn accepts(&self, generation: u64) -> bool {
        self.attached && generation == self.generation
    }

    /// Handle the end of a cycle.
    ///
    /// Only the anchor book and the one after it are kept for the next cycle.
    pub fn finish(&mut self, generation: u64, books: Vec<Arc<Book>>) {
        if generation != self.generation {
            return;
        }
        self.loading = false;
        self.cancel = None;

        let Some(anchor) = self.anchor_book.take() else {
            self.books.clear();
            return;
        };
        let next = self.catalog.next(&anchor);
        self.books = books
            .into_iter()
            .filter(|b| b.name == anchor || next == Some(b.name.as_str()))
            .map(|b| (b.name.clone(), b))
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bible::testing::{memory_source, sample_book};
    use pretty_assertions::assert_eq;

    static SMALL: [&str; 2] = ["Genesis", "Exodus"];

    fn item(book: &str, chapter: u32, new_book: bool) -> PreloadItem {
        PreloadItem { book: book.into(), chapter, new_book }
    }

    fn fast() -> PreloadTiming {
        PreloadTiming { stagger: Duration::from_millis(1), grace: Duration::from_millis(1) }
    }

    #[test]
    fn trigger_threshold() {
        // 100 lines of content, 20 line viewport: triggers from offset 65
        let at = |offset| Viewport { offset, height: 20, document_height: 100 };
        assert!(!at(64).near_end());
        assert!(at(65).near_end());
        assert!(at(80).near_end());
    }

    #[test]
    fn short_document_triggers_immediately() {
        let viewport = Viewport { offset: 0, height: 40, document_height: 30 };
        assert!(viewport.near_end());
    }

    #[tokio::test]
    async fn plans_within_current_book() {
        let genesis = sample_book("Genesis", 5, 3);
        let source = memory_source(&[("Exodus", 3)]);
        let queue = plan_queue(
            &Position::new("Genesis", 2),
            &genesis,
            &mut BookCache::new(),
            &source,
            &BookIndex::new(&SMALL),
            LOOKAHEAD,
        )
        .await;
        assert_eq!(queue, vec![item("Genesis", 3, false), item("Genesis", 4, false)]);
    }

    #[tokio::test]
    async fn plans_across_book_boundary() {
        let genesis = sample_book("Genesis", 5, 3);
        let source = memory_source(&[("Exodus", 3)]);
        let mut cache = BookCache::new();
        let queue = plan_queue(
            &Position::new("Genesis", 4),
            &genesis,
            &mut cache,
            &source,
            &BookIndex::new(&SMALL),
            LOOKAHEAD,
        )
        .await;
        assert_eq!(queue, vec![item("Genesis", 5, false), item("Exodus", 1, true)]);
        assert!(cache.contains_key("Exodus"));
    }

    #[tokio::test]
    async fn plans_two_chapters_of_next_book_from_last_chapter() {
        let genesis = sample_book("Genesis", 5, 3);
        let source = memory_source(&[("Exodus", 3)]);
        let queue = plan_queue(
            &Position::new("Genesis", 5),
            &genesis,
            &mut BookCache::new(),
            &source,
            &BookIndex::new(&SMALL),
            LOOKAHEAD,
        )
        .await;
        assert_eq!(queue, vec![item("Exodus", 1, true), item("Exodus", 2, true)]);
    }

    #[tokio::test]
    async fn queue_ends_at_end_of_corpus() {
        let exodus = sample_book("Exodus", 3, 3);
        let source = memory_source(&[]);
        let queue = plan_queue(
            &Position::new("Exodus", 3),
            &exodus,
            &mut BookCache::new(),
            &source,
            &BookIndex::new(&SMALL),
            LOOKAHEAD,
        )
        .await;
        assert!(queue.is_empty());
    }

    #[tokio::test]
    async fn missing_next_book_truncates_queue() {
        let genesis = sample_book("Genesis", 5, 3);
        let source = memory_source(&[]);
        let queue = plan_queue(
            &Position::new("Genesis", 4),
            &genesis,
            &mut BookCache::new(),
            &source,
            &BookIndex::new(&SMALL),
            LOOKAHEAD,
        )
        .await;
        assert_eq!(queue, vec![item("Genesis", 5, false)]);
    }

    #[tokio::test]
    async fn cycle_delivers_blocks_in_order_then_finishes() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler =
            PreloadScheduler::new(BookIndex::new(&SMALL), tx).with_timing(fast());
        scheduler.attach();

        let source = memory_source(&[("Genesis", 5), ("Exodus", 3)]);
        let genesis = Arc::new(sample_book("Genesis", 5, 3));
        let generation = scheduler.start(
            Position::new("Genesis", 4),
            Some(genesis),
            source,
            ViewMode::Plain,
            TextStyle::default(),
        );
        assert!(scheduler.is_loading());

        let Some(PreloadMessage::Block { block, new_book, .. }) = rx.recv().await else {
            panic!("expected a block");
        };
        assert_eq!((block.book.as_str(), block.chapter, new_book), ("Genesis", 5, false));

        let Some(PreloadMessage::Block { block, new_book, .. }) = rx.recv().await else {
            panic!("expected a block");
        };
        assert_eq!((block.book.as_str(), block.chapter, new_book), ("Exodus", 1, true));
        assert_eq!(block.fragment.header().map(|h| h.kind), Some(crate::view::HeaderKind::NewBook));

        let Some(PreloadMessage::Finished { generation: finished, books }) = rx.recv().await else {
            panic!("expected the cycle to finish");
        };
        assert_eq!(finished, generation);
        assert!(scheduler.accepts(finished));
        scheduler.finish(finished, books);
        assert!(!scheduler.is_loading());
    }

    #[tokio::test]
    async fn cancelled_cycle_goes_quiet() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let timing = PreloadTiming { stagger: Duration::from_secs(60), grace: Duration::from_secs(60) };
        let mut scheduler = PreloadScheduler::new(BookIndex::new(&SMALL), tx).with_timing(timing);
        scheduler.attach();

        let source = memory_source(&[("Genesis", 5)]);
        let generation = scheduler.start(
            Position::new("Genesis", 1),
            None,
            source,
            ViewMode::Boxed,
            TextStyle::default(),
        );

        // First item is delivered straight away, the second waits on the stagger
        assert!(matches!(rx.recv().await, Some(PreloadMessage::Block { .. })));
        scheduler.detach();
        assert!(!scheduler.is_loading());
        assert!(!scheduler.accepts(generation));

        drop(scheduler);
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn finished_cycle_keeps_only_anchor_and_next_book() {
        static THREE: [&str; 3] = ["Genesis", "Exodus", "Leviticus"];
        let (tx, _rx) = mpsc::unbounded_channel();
        let timing = PreloadTiming { stagger: Duration::from_secs(60), grace: Duration::from_secs(60) };
        let mut scheduler = PreloadScheduler::new(BookIndex::new(&THREE), tx).with_timing(timing);
        scheduler.attach();

        let generation = scheduler.start(
            Position::new("Exodus", 3),
            None,
            memory_source(&[("Exodus", 3), ("Leviticus", 2)]),
            ViewMode::Plain,
            TextStyle::default(),
        );
        let books = ["Genesis", "Exodus", "Leviticus"]
            .into_iter()
            .map(|name| Arc::new(sample_book(name, 2, 1)))
            .collect();
        scheduler.finish(generation, books);

        assert!(scheduler.cached("Genesis").is_none());
        assert!(scheduler.cached("Exodus").is_some());
        assert!(scheduler.cached("Leviticus").is_some());
    }

    #[test]
    fn detached_scheduler_never_triggers() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut scheduler = PreloadScheduler::new(BookIndex::canonical(), tx);
        let viewport = Viewport { offset: 90, height: 20, document_height: 100 };
        assert!(!scheduler.should_trigger(&viewport));

        scheduler.attach();
        assert!(scheduler.should_trigger(&viewport));

        scheduler.detach();
        assert!(!scheduler.should_trigger(&viewport));
    }
}
