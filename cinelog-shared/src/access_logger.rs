/// Fire-and-forget access logging
///
/// Every authenticated request under the logged path prefix results in one
/// call to [`AccessLogger::record`]. The insert runs on its own tokio task:
/// the request never waits for it, and a failed insert is only reported to
/// the operational log.
///
/// # Example
///
/// ```
/// use cinelog_shared::access_logger::AccessLogger;
/// use cinelog_shared::store::InMemoryStore;
/// use std::sync::Arc;
///
/// # async fn example() {
/// let store = Arc::new(InMemoryStore::new());
/// let logger = AccessLogger::new(store.clone());
///
/// logger.record(1).await.ok();
/// assert_eq!(store.access_logs().len(), 1);
/// # }
/// ```

use crate::store::Store;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error};

/// Dispatches access log writes without blocking the caller
#[derive(Clone)]
pub struct AccessLogger {
    store: Arc<dyn Store>,
    in_flight: Arc<AtomicUsize>,
}

/// Decrements the in-flight counter when the write task ends, even on panic
struct InFlightGuard(Arc<AtomicUsize>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl AccessLogger {
    /// Creates a logger writing to `store`
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Spawns exactly one insert attempt for `user_id`
    ///
    /// Must be called from within a tokio runtime. Callers normally drop the
    /// returned handle; the task keeps running detached.
    pub fn record(&self, user_id: i64) -> JoinHandle<()> {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        let guard = InFlightGuard(self.in_flight.clone());
        let store = self.store.clone();

        tokio::spawn(async move {
            let _guard = guard;
            match store.append_access_log(user_id).await {
                Ok(entry) => debug!(user_id, entry_id = entry.id, "Access logged"),
                Err(e) => error!(user_id, error = %e, "Failed to write access log"),
            }
        })
    }

    /// Number of writes dispatched but not finished yet
    pub fn pending(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }
}
