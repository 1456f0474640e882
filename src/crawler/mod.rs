//! The crawler itself
//!
//! Submodules split the crawl into its moving parts: the [`fetcher`] owns
//! HTTP, the [`extractor`] owns HTML, the [`frontier`] holds pending work,
//! the [`downloader`] runs the image worker pool, and the [`coordinator`]
//! wires them together into a bounded breadth-first traversal.

pub mod coordinator;
pub mod downloader;
pub mod extractor;
pub mod fetcher;
pub mod frontier;

pub use coordinator::{crawl, Coordinator};
pub use downloader::ImagePool;
pub use extractor::{extract, ExtractedPage};
pub use fetcher::{build_http_client, fetch_image, fetch_page, FetchError, ImageContent, PageContent};
pub use frontier::{CrawlTask, Frontier};
