//! Request-generation guard against stale asynchronous results
//!
//! A user can fire a new search or keystroke before the previous network call
//! resolves. Every load that writes into shared state takes a token from the
//! tracker first and checks it before committing; a response belonging to a
//! superseded request is discarded, so the visible state always reflects the
//! latest request regardless of network completion order.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Monotonic counter handing out one generation per request
#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: Arc<AtomicU64>,
}

/// The generation stamped on one request. `is_current` stays true until the
/// tracker begins a newer request.
#[derive(Debug, Clone)]
pub struct RequestToken {
    generation: u64,
    latest: Arc<AtomicU64>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding every token issued before
    pub fn begin(&self) -> RequestToken {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        RequestToken {
            generation,
            latest: Arc::clone(&self.latest),
        }
    }
}

impl RequestToken {
    /// Whether this request is still the latest one issued
    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::SeqCst) == self.generation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_token_is_current() {
        let tracker = RequestTracker::new();
        let token = tracker.begin();
        assert!(token.is_current());
    }

    #[test]
    fn test_newer_request_supersedes() {
        let tracker = RequestTracker::new();
        let first = tracker.begin();
        let second = tracker.begin();
        assert!(!first.is_current());
        assert!(second.is_current());
    }

    #[test]
    fn test_generations_are_monotonic() {
        let tracker = RequestTracker::new();
        let a = tracker.begin();
        let b = tracker.begin();
        let c = tracker.begin();
        assert!(a.generation() < b.generation());
        assert!(b.generation() < c.generation());
    }

    #[tokio::test]
    async fn test_out_of_order_completion_keeps_latest() {
        // Two overlapping "searches": the first resolves after the second.
        // Only the second may commit.
        let tracker = RequestTracker::new();
        let first = tracker.begin();
        let second = tracker.begin();

        let mut committed: Option<&str> = None;

        // Second search's response arrives first
        if second.is_current() {
            committed = Some("second");
        }
        // First search's response arrives late and must be discarded
        if first.is_current() {
            committed = Some("first");
        }

        assert_eq!(committed, Some("second"));
    }
}
