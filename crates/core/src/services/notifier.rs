use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// Handle returned by [`ChangeNotifier::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Arc<dyn Fn() + Send + Sync>;

/// Broadcast of "the ledger changed", with no payload.
///
/// Delivery is synchronous and best-effort: a panicking observer is logged
/// and skipped, the remaining observers still run. Observers may subscribe
/// or unsubscribe from inside a callback; the change takes effect on the
/// next notification.
#[derive(Default)]
pub struct ChangeNotifier {
    observers: Mutex<Vec<(SubscriptionId, Observer)>>,
    next_id: AtomicU64,
}

impl std::fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("observers", &self.observer_count())
            .finish()
    }
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.lock().push((id, Arc::new(observer)));
        id
    }

    /// Returns `false` if the id was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self.lock();
        let before = observers.len();
        observers.retain(|(sid, _)| *sid != id);
        observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.lock().len()
    }

    /// Call every observer once. Returns how many completed without panicking.
    pub fn notify(&self) -> usize {
        // Snapshot the list so callbacks can (un)subscribe without deadlocking.
        let observers: Vec<(SubscriptionId, Observer)> = self.lock().clone();
        let mut delivered = 0;
        for (id, observer) in observers {
            match catch_unwind(AssertUnwindSafe(|| observer())) {
                Ok(()) => delivered += 1,
                Err(_) => tracing::warn!(subscription = id.0, "change observer panicked"),
            }
        }
        tracing::debug!(delivered, "change notification sent");
        delivered
    }

    fn lock(&self) -> MutexGuard<'_, Vec<(SubscriptionId, Observer)>> {
        self.observers.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
