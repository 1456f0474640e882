//! Run counters and the final crawl report
//!
//! Counters are atomic because image workers increment them concurrently with
//! the orchestrator loop; everything is monotonic for the lifetime of a run.

use std::sync::atomic::{AtomicU64, Ordering};

/// Live counters for one crawl run
#[derive(Debug, Default)]
pub struct CrawlStats {
    pages_fetched: AtomicU64,
    texts_saved: AtomicU64,
    images_downloaded: AtomicU64,
    errors: AtomicU64,
}

/// Immutable snapshot of the counters, reported at the end of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlReport {
    pub pages_fetched: u64,
    pub texts_saved: u64,
    pub images_downloaded: u64,
    pub errors: u64,
}

impl CrawlStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_page_fetched(&self) {
        self.pages_fetched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_text_saved(&self) {
        self.texts_saved.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_image_downloaded(&self) {
        self.images_downloaded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_error(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of pages successfully fetched so far
    ///
    /// The orchestrator polls this against `max_pages` at every loop
    /// iteration.
    pub fn pages_fetched(&self) -> u64 {
        self.pages_fetched.load(Ordering::Relaxed)
    }

    /// Takes a consistent-enough snapshot for final reporting
    pub fn report(&self) -> CrawlReport {
        CrawlReport {
            pages_fetched: self.pages_fetched.load(Ordering::Relaxed),
            texts_saved: self.texts_saved.load(Ordering::Relaxed),
            images_downloaded: self.images_downloaded.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
        }
    }
}
