//! Crawl orchestration
//!
//! The coordinator drives the breadth-first traversal: it pops (URL, depth)
//! tasks off the frontier, claims them against the deduplicator, fetches and
//! extracts pages, persists text, hands images to the download pool, and
//! enqueues newly discovered links that are still within the depth bound.
//!
//! The frontier loop itself is single-task; the only concurrency in a run
//! lives inside the image pool, and the only state crossing that boundary is
//! the deduplicator and the stats counters.

use crate::config::CrawlConfig;
use crate::crawler::downloader::ImagePool;
use crate::crawler::extractor::extract;
use crate::crawler::fetcher::{build_http_client, fetch_page};
use crate::crawler::frontier::{CrawlTask, Frontier};
use crate::state::{CrawlReport, CrawlStats, Deduplicator};
use crate::storage::StorageWriter;
use crate::url::same_site;
use crate::CrawlError;
use reqwest::Client;
use std::path::Path;
use std::sync::Arc;

/// Main crawl coordinator
pub struct Coordinator {
    config: CrawlConfig,
    client: Client,
    dedup: Arc<Deduplicator>,
    storage: Arc<StorageWriter>,
    stats: Arc<CrawlStats>,
    frontier: Frontier,
    pool: ImagePool,
}

impl Coordinator {
    /// Creates a coordinator, its output archive, and the image pool
    ///
    /// # Arguments
    ///
    /// * `config` - Validated, immutable run configuration
    /// * `output_parent` - Directory under which the dated archive root is
    ///   created
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(CrawlError)` - Archive or HTTP client setup failed (fatal)
    pub fn new(config: CrawlConfig, output_parent: &Path) -> Result<Self, CrawlError> {
        let storage = Arc::new(StorageWriter::create(output_parent)?);
        let client = build_http_client(config.request_timeout)?;
        let dedup = Arc::new(Deduplicator::new());
        let stats = Arc::new(CrawlStats::new());

        let pool = ImagePool::new(
            client.clone(),
            Arc::clone(&dedup),
            Arc::clone(&storage),
            Arc::clone(&stats),
            config.concurrency,
        );

        let mut frontier = Frontier::new();
        frontier.push(CrawlTask::seed(config.seed_url.clone()));

        Ok(Self {
            config,
            client,
            dedup,
            storage,
            stats,
            frontier,
            pool,
        })
    }

    /// The run's output root directory
    pub fn output_root(&self) -> &Path {
        self.storage.root()
    }

    /// Runs the crawl to completion and returns the final report
    ///
    /// The loop terminates when the frontier is empty or `max_pages` pages
    /// have been fetched; the pool is then drained so the report covers every
    /// image side effect. Per-task failures are counted, never propagated.
    pub async fn run(mut self) -> CrawlReport {
        tracing::info!(
            "starting crawl of {} (max_pages={}, max_depth={})",
            self.config.seed_url,
            self.config.max_pages,
            self.config.max_depth
        );
        let start_time = std::time::Instant::now();

        while let Some(task) = self.frontier.pop() {
            if self.stats.pages_fetched() >= self.config.max_pages as u64 {
                tracing::info!("page limit reached, stopping traversal");
                break;
            }

            // Claim at dequeue time: the frontier may hold duplicates, but
            // only the first claim processes the URL. Not an error.
            if !self.dedup.try_claim_url(task.url.as_str()) {
                tracing::debug!("skipping already-claimed URL: {}", task.url);
                continue;
            }

            self.process_task(&task).await;

            let fetched = self.stats.pages_fetched();
            if fetched > 0 && fetched % 10 == 0 {
                tracing::info!(
                    "progress: {} pages fetched, {} queued",
                    fetched,
                    self.frontier.len()
                );
            }
        }

        // Every queued and in-flight image completes before reporting
        self.pool.drain_and_wait().await;

        let report = self.stats.report();
        tracing::info!(
            "crawl finished in {:.2?}: {} pages, {} texts, {} images, {} errors",
            start_time.elapsed(),
            report.pages_fetched,
            report.texts_saved,
            report.images_downloaded,
            report.errors
        );

        report
    }

    /// Fetches, extracts, and persists one claimed task
    async fn process_task(&mut self, task: &CrawlTask) {
        tracing::debug!("fetching {} (depth {})", task.url, task.depth);

        let content = match fetch_page(&self.client, &task.url).await {
            Ok(content) => content,
            Err(e) => {
                self.stats.record_error();
                tracing::warn!("failed to fetch {}: {}", task.url, e);
                return;
            }
        };

        self.stats.record_page_fetched();

        let page = extract(&content);
        tracing::debug!(
            "{}: {} links, {} images, {} text bytes",
            task.url,
            page.link_urls.len(),
            page.image_urls.len(),
            page.text.len()
        );

        match self.storage.write_text(&task.url, task.depth, &page.text) {
            Ok(path) => {
                self.stats.record_text_saved();
                tracing::debug!("saved text {} -> {}", task.url, path.display());
            }
            Err(e) => {
                self.stats.record_error();
                tracing::warn!("failed to store text for {}: {}", task.url, e);
            }
        }

        for image_url in &page.image_urls {
            self.pool.submit(image_url.clone());
        }

        // Enqueue without consulting the deduplicator; the claim happens at
        // dequeue. Traversal stays on the seed's host.
        if task.depth < self.config.max_depth {
            for link in &page.link_urls {
                if same_site(link, &self.config.seed_url) {
                    self.frontier.push(CrawlTask {
                        url: link.clone(),
                        depth: task.depth + 1,
                    });
                }
            }
        }
    }
}

/// Runs a complete crawl with the given configuration
///
/// Convenience wrapper that builds a [`Coordinator`], runs it, and returns
/// the final report.
///
/// # Arguments
///
/// * `config` - Validated run configuration
/// * `output_parent` - Directory under which the dated archive root is
///   created
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Final counters for the run
/// * `Err(CrawlError)` - Startup failed before any crawling
pub async fn crawl(config: CrawlConfig, output_parent: &Path) -> Result<CrawlReport, CrawlError> {
    let coordinator = Coordinator::new(config, output_parent)?;
    Ok(coordinator.run().await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::build_config;

    #[tokio::test]
    async fn test_coordinator_creation_builds_archive() {
        let dir = tempfile::tempdir().unwrap();
        let config = build_config("https://example.com/", 5, 1, 10, 2).unwrap();
        let coordinator = Coordinator::new(config, dir.path()).unwrap();

        assert!(coordinator.output_root().join("texts").is_dir());
        assert!(coordinator.output_root().join("images").is_dir());
    }

    // Full traversal behavior is covered end-to-end against wiremock servers
    // in tests/crawl_tests.rs.
}
