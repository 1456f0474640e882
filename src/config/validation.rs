use super::CrawlConfig;
use crate::url::normalize_url;
use crate::{ConfigError, ConfigResult};
use std::time::Duration;

/// Builds a validated [`CrawlConfig`] from raw command-line values
///
/// The seed URL is normalized here so that the first visited-set claim uses
/// the same key form as every discovered link.
///
/// # Arguments
///
/// * `seed_url` - The raw seed URL string
/// * `max_pages` - Maximum number of pages to fetch
/// * `max_depth` - Maximum link depth from the seed
/// * `timeout_secs` - Per-request timeout in seconds
/// * `concurrency` - Number of image download workers
///
/// # Returns
///
/// * `Ok(CrawlConfig)` - Validated, immutable run configuration
/// * `Err(ConfigError)` - The run must not start
pub fn build_config(
    seed_url: &str,
    max_pages: usize,
    max_depth: u32,
    timeout_secs: u64,
    concurrency: usize,
) -> ConfigResult<CrawlConfig> {
    let seed_url = normalize_url(seed_url).map_err(|e| ConfigError::InvalidSeedUrl {
        url: seed_url.to_string(),
        reason: e.to_string(),
    })?;

    if max_pages < 1 {
        return Err(ConfigError::InvalidLimit {
            name: "max-pages",
            minimum: 1,
        });
    }

    if concurrency < 1 {
        return Err(ConfigError::InvalidLimit {
            name: "concurrency",
            minimum: 1,
        });
    }

    if timeout_secs == 0 {
        return Err(ConfigError::InvalidTimeout);
    }

    Ok(CrawlConfig {
        seed_url,
        max_pages,
        max_depth,
        request_timeout: Duration::from_secs(timeout_secs),
        concurrency,
    })
}
