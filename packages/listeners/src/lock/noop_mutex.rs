use std::cell::Cell;

use parking_lot::lock_api;

use crate::ERR_NOOP_RELOCKED;

/// A mutual-exclusion primitive that never blocks and performs no synchronization.
///
/// This is the primitive behind the [`Unsynchronized`][crate::Unsynchronized] policy, used when
/// a value is guaranteed to never be touched by more than one thread. It only remembers whether
/// it is held, so that locking it twice fails loudly instead of handing out two acquisitions.
///
/// The type is `!Sync`, so anything built on top of it cannot be shared between threads and the
/// missing synchronization can never be observed.
#[derive(Debug, Default)]
pub struct NoopMutex {
    locked: Cell<bool>,
}

impl NoopMutex {
    /// Creates the primitive in the unlocked state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            locked: Cell::new(false),
        }
    }
}

// SAFETY: The type is `!Sync`, so every call comes from the thread that owns it and there is no
// other thread to exclude. A second acquisition panics instead of succeeding.
unsafe impl lock_api::RawMutex for NoopMutex {
    const INIT: Self = Self::new();

    type GuardMarker = lock_api::GuardNoSend;

    fn lock(&self) {
        assert!(!self.locked.replace(true), "{ERR_NOOP_RELOCKED}");
    }

    fn try_lock(&self) -> bool {
        !self.locked.replace(true)
    }

    unsafe fn unlock(&self) {
        self.locked.set(false);
    }

    fn is_locked(&self) -> bool {
        self.locked.get()
    }
}
