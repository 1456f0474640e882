//! Shared crawl-run state
//!
//! The deduplicator and the stats counters are the only mutable state shared
//! between the orchestrator loop and the image download workers.

mod dedup;
mod stats;

pub use dedup::Deduplicator;
pub use stats::{CrawlReport, CrawlStats};
