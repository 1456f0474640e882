//! Run configuration
//!
//! A crawl run is configured entirely from the command line; the values are
//! validated once at startup and are immutable for the lifetime of the run.

mod types;
mod validation;

pub use types::CrawlConfig;
pub use validation::build_config;
