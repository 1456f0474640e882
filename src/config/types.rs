use std::time::Duration;
use url::Url;

/// Immutable configuration for one crawl run
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// The (normalized) URL the crawl starts from
    pub seed_url: Url,

    /// Maximum number of pages to fetch (at least 1)
    pub max_pages: usize,

    /// Maximum link depth from the seed (0 = seed only)
    pub max_depth: u32,

    /// Per-request timeout applied to every page and image fetch
    pub request_timeout: Duration,

    /// Number of parallel image download workers (at least 1)
    pub concurrency: usize,
}
