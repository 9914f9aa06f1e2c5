// THEORY:
// The `latest_cell` module is the producer-to-consumer handoff primitive for
// continuously streaming state. Camera frames and tracked geometry arrive at
// sensor rate on a producer context; tap handling runs on a consumer context
// and only ever cares about the single most recent value. The cell makes that
// pattern explicit: `publish` atomically replaces the held value, `snapshot`
// hands back a frozen reference to whatever was most recently published.
//
// Key architectural principles:
// 1.  **Pointer swap, not data copy**: values live behind an `Arc`. Both
//     publish and snapshot only touch the pointer inside the lock, so the
//     critical section is a few instructions regardless of payload size and
//     the producer path never blocks on a slow consumer.
// 2.  **Torn reads are impossible**: a snapshot is always a fully-formed value.
//     A consumer holding a snapshot keeps it alive even while the producer
//     replaces the cell underneath it.
// 3.  **No history**: exactly one value is retained. Replaced values are
//     dropped as soon as the last snapshot of them goes away.

use parking_lot::RwLock;
use std::sync::Arc;

/// An atomically replaceable "most recent value" slot.
#[derive(Debug)]
pub struct LatestCell<T> {
    slot: RwLock<Option<Arc<T>>>,
}

impl<T> LatestCell<T> {
    /// Creates an empty cell. Snapshots return `None` until the first publish.
    pub fn new() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }

    /// Replaces the held value. Non-blocking with respect to payload size;
    /// always succeeds.
    pub fn publish(&self, value: T) {
        let next = Some(Arc::new(value));
        *self.slot.write() = next;
    }

    /// Returns a frozen reference to the most recently published value, or
    /// `None` if nothing has been published yet.
    pub fn snapshot(&self) -> Option<Arc<T>> {
        self.slot.read().clone()
    }

    /// Empties the cell. Outstanding snapshots stay valid.
    pub fn clear(&self) {
        *self.slot.write() = None;
    }
}

impl<T> Default for LatestCell<T> {
    fn default() -> Self {
        Self::new()
    }
}
