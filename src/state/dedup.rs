use std::collections::HashSet;
use std::sync::Mutex;

/// Atomic check-and-insert registry for visited pages and downloaded images
///
/// All mutation of the visited set and the image registry funnels through
/// [`try_claim_url`](Deduplicator::try_claim_url) and
/// [`try_claim_image`](Deduplicator::try_claim_image); no other component
/// reads or writes the sets directly. A successful claim grants the caller
/// exclusive processing rights for that key for the rest of the run.
///
/// Both sets grow monotonically and hold normalized URL strings.
#[derive(Debug, Default)]
pub struct Deduplicator {
    visited: Mutex<HashSet<String>>,
    images: Mutex<HashSet<String>>,
}

impl Deduplicator {
    /// Creates an empty deduplicator
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims a page URL for processing
    ///
    /// Atomically checks membership and inserts if absent. Returns true iff
    /// this call performed the insert, i.e. the caller owns processing this
    /// URL. At most one call per URL ever returns true, including under
    /// concurrent callers.
    pub fn try_claim_url(&self, url: &str) -> bool {
        self.visited.lock().unwrap().insert(url.to_string())
    }

    /// Claims an image URL for downloading
    ///
    /// Same contract as [`try_claim_url`](Self::try_claim_url), over the
    /// image registry.
    pub fn try_claim_image(&self, url: &str) -> bool {
        self.images.lock().unwrap().insert(url.to_string())
    }

    /// Number of URLs claimed so far (fetched or in flight)
    pub fn visited_count(&self) -> usize {
        self.visited.lock().unwrap().len()
    }

    /// Number of image URLs claimed so far
    pub fn image_count(&self) -> usize {
        self.images.lock().unwrap().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_first_claim_succeeds() {
        let dedup = Deduplicator::new();
        assert!(dedup.try_claim_url("https://example.com/page"));
    }

    #[test]
    fn test_second_claim_fails() {
        let dedup = Deduplicator::new();
        assert!(dedup.try_claim_url("https://example.com/page"));
        assert!(!dedup.try_claim_url("https://example.com/page"));
    }

    #[test]
    fn test_url_and_image_registries_are_independent() {
        let dedup = Deduplicator::new();
        assert!(dedup.try_claim_url("https://example.com/x"));
        assert!(dedup.try_claim_image("https://example.com/x"));
    }

    #[test]
    fn test_counts() {
        let dedup = Deduplicator::new();
        dedup.try_claim_url("https://example.com/a");
        dedup.try_claim_url("https://example.com/b");
        dedup.try_claim_url("https://example.com/a");
        dedup.try_claim_image("https://example.com/img.png");
        assert_eq!(dedup.visited_count(), 2);
        assert_eq!(dedup.image_count(), 1);
    }

    #[test]
    fn test_concurrent_claims_grant_exactly_one_owner() {
        let dedup = Arc::new(Deduplicator::new());
        let mut handles = Vec::new();

        for _ in 0..16 {
            let dedup = Arc::clone(&dedup);
            handles.push(std::thread::spawn(move || {
                dedup.try_claim_image("https://example.com/shared.png")
            }));
        }

        let wins: usize = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|claimed| *claimed)
            .count();

        assert_eq!(wins, 1);
        assert_eq!(dedup.image_count(), 1);
    }
}
