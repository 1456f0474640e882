//! The crawl frontier
//!
//! A FIFO queue of (URL, depth) pairs awaiting traversal. First-in-first-out
//! order makes the traversal breadth-first: every depth-d page is dequeued
//! before any depth-(d+1) page, which is what makes the depth bound cheap to
//! enforce.
//!
//! The frontier is intentionally dumb about duplicates: a URL may be queued
//! more than once, because exclusion happens at dequeue time via the
//! deduplicator's claim, not at enqueue time.

use std::collections::VecDeque;
use url::Url;

/// A unit of traversal work: one URL at a known distance from the seed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTask {
    /// The (normalized) URL to fetch
    pub url: Url,

    /// Number of link hops from the seed URL
    pub depth: u32,
}

impl CrawlTask {
    /// Creates the initial task for a crawl: the seed at depth 0
    pub fn seed(url: Url) -> Self {
        Self { url, depth: 0 }
    }
}

/// FIFO queue of pending crawl tasks
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<CrawlTask>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a task at the back of the queue
    pub fn push(&mut self, task: CrawlTask) {
        self.queue.push_back(task);
    }

    /// Removes and returns the oldest task, if any
    pub fn pop(&mut self) -> Option<CrawlTask> {
        self.queue.pop_front()
    }

    /// Number of queued tasks (duplicates included)
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
