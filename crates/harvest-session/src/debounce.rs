//! Input debouncing for interactive search.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::time::{sleep, Duration};

/// Quiet window before a submission fires.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(500);

/// Coalesces rapid submissions; only the last value of a burst survives.
///
/// Every submission waits out the delay. A newer submission arriving in
/// the meantime supersedes the pending one, which resolves to `None`
/// instead of firing. Clones share the same window, so submissions from
/// different tasks supersede each other.
#[derive(Clone)]
pub struct Debouncer {
    delay: Duration,
    generation: Arc<AtomicU64>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::with_delay(DEBOUNCE_DELAY)
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Submit a value.
    ///
    /// Resolves to `Some(value)` when the quiet window passes with no newer
    /// submission, `None` when superseded.
    pub async fn submit<T>(&self, value: T) -> Option<T> {
        let mine = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        sleep(self.delay).await;
        if self.generation.load(Ordering::SeqCst) == mine {
            Some(value)
        } else {
            None
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new()
    }
}
