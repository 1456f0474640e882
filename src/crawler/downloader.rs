//! Concurrent image download pool
//!
//! A fixed number of workers drain a shared queue of image URLs. Each worker
//! claims the URL against the shared [`Deduplicator`] before touching the
//! network, so an image referenced from many pages is downloaded at most once
//! per run. Individual failures are counted and never abort the pool or the
//! crawl.
//!
//! Submission is non-blocking and the queue is unbounded; in practice it is
//! bounded by `max_pages` times the images per page, so no backpressure is
//! needed at this scale.

use crate::crawler::fetcher::fetch_image;
use crate::state::{CrawlStats, Deduplicator};
use crate::storage::StorageWriter;
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use url::Url;

/// Fixed-size worker pool downloading and persisting images
pub struct ImagePool {
    tx: mpsc::UnboundedSender<Url>,
    workers: Vec<JoinHandle<()>>,
}

impl ImagePool {
    /// Spawns `concurrency` workers sharing one queue
    ///
    /// # Arguments
    ///
    /// * `client` - The shared HTTP client (carries the request timeout)
    /// * `dedup` - Shared deduplicator; workers claim before downloading
    /// * `storage` - Archive writer for downloaded bytes
    /// * `stats` - Shared counters; downloads and failures are recorded here
    /// * `concurrency` - Number of workers (at least 1)
    pub fn new(
        client: Client,
        dedup: Arc<Deduplicator>,
        storage: Arc<StorageWriter>,
        stats: Arc<CrawlStats>,
        concurrency: usize,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel::<Url>();
        let rx = Arc::new(Mutex::new(rx));

        let workers = (0..concurrency)
            .map(|worker_id| {
                let rx = Arc::clone(&rx);
                let client = client.clone();
                let dedup = Arc::clone(&dedup);
                let storage = Arc::clone(&storage);
                let stats = Arc::clone(&stats);

                tokio::spawn(async move {
                    loop {
                        // Take the lock only for the handoff; processing
                        // happens with the queue released so workers overlap.
                        let url = { rx.lock().await.recv().await };
                        let Some(url) = url else {
                            tracing::trace!("image worker {} shutting down", worker_id);
                            break;
                        };

                        process_image(&client, &dedup, &storage, &stats, url).await;
                    }
                })
            })
            .collect();

        Self { tx, workers }
    }

    /// Queues an image URL for download; never blocks the caller
    pub fn submit(&self, url: Url) {
        // Send fails only after drain_and_wait closed the queue
        if self.tx.send(url).is_err() {
            tracing::warn!("image submitted after pool shutdown, dropped");
        }
    }

    /// Closes the queue and waits for all queued and in-flight work
    ///
    /// Consumes the pool: once drained it cannot accept new work. The
    /// orchestrator calls this after the frontier loop so the final report
    /// reflects every image side effect.
    pub async fn drain_and_wait(self) {
        drop(self.tx);
        for worker in self.workers {
            if let Err(e) = worker.await {
                tracing::error!("image worker task failed: {}", e);
            }
        }
    }
}

/// Downloads and persists one claimed image
async fn process_image(
    client: &Client,
    dedup: &Deduplicator,
    storage: &StorageWriter,
    stats: &CrawlStats,
    url: Url,
) {
    if !dedup.try_claim_image(url.as_str()) {
        tracing::debug!("skipping already-claimed image: {}", url);
        return;
    }

    match fetch_image(client, &url).await {
        Ok(image) => match storage.write_image(&url, &image.bytes, &image.content_type) {
            Ok(path) => {
                stats.record_image_downloaded();
                tracing::debug!("saved image {} -> {}", url, path.display());
            }
            Err(e) => {
                stats.record_error();
                tracing::warn!("failed to store image {}: {}", url, e);
            }
        },
        Err(e) => {
            stats.record_error();
            tracing::debug!("failed to fetch image {}: {}", url, e);
        }
    }
}
