//! URL normalization and host helpers
//!
//! Every URL that enters the visited set, the image registry, or the frontier
//! goes through [`normalize_url`] first, so that trivially different spellings
//! of the same address collapse to a single dedup key.

mod normalize;

pub use normalize::normalize_url;

use url::Url;

/// Extracts the host from a URL, lowercased and without a `www.` prefix
///
/// Returns `None` for URLs without a host (e.g. `data:` URIs).
pub fn extract_host(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    Some(host.strip_prefix("www.").unwrap_or(&host).to_string())
}

/// Returns true if both URLs point at the same host
///
/// Used by the orchestrator to keep traversal on the seed's site. Ports are
/// compared as well so that two local test servers never count as one site.
pub fn same_site(a: &Url, b: &Url) -> bool {
    extract_host(a) == extract_host(b) && a.port_or_known_default() == b.port_or_known_default()
}
