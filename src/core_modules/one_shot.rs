// THEORY:
// The `one_shot` module is a single-fire event latch. Some notifications must
// happen exactly once per session no matter how many times the trigger
// repeats; the canonical case here is "a surface was discovered," which the
// tracking source re-reports for every additional surface it finds. The latch
// is a compare-and-set boolean: the first `fire` wins, every later one
// short-circuits, and only an explicit session reset re-arms it.

use std::sync::atomic::{AtomicBool, Ordering};

/// A latch that reports `true` for exactly one `fire` per armed period.
#[derive(Debug, Default)]
pub struct OneShotLatch {
    fired: AtomicBool,
}

impl OneShotLatch {
    pub fn new() -> Self {
        Self {
            fired: AtomicBool::new(false),
        }
    }

    /// Attempts to fire the latch. Returns `true` only for the first caller
    /// since the latch was armed; all later calls return `false`.
    pub fn fire(&self) -> bool {
        self.fired
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }

    /// Re-arms the latch. Only a full session restart should call this.
    pub fn reset(&self) {
        self.fired.store(false, Ordering::Release);
    }
}
