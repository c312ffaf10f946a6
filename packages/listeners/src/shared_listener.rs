use std::sync::Arc;

use arc_swap::ArcSwapOption;

use crate::invoke::invoke_one;

/// A lock-free slot for at most one shared-ownership listener.
///
/// This offers the operations of [`Listener<Option<Arc<T>>>`][crate::Listener] but stores the
/// listener in an atomically swapped pointer instead of behind a lock. Replacing the listener is a
/// single atomic exchange and dispatching is a single atomic load, which makes this the cheapest
/// slot when listeners are read far more often than they are replaced.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// use listeners::SharedListener;
///
/// let counter = Arc::new(AtomicUsize::new(0));
/// let listener = SharedListener::with_listener(Arc::clone(&counter));
///
/// listener.invoke(|counter| {
///     counter.fetch_add(1, Ordering::Relaxed);
/// });
///
/// let previous = listener.swap(None);
/// assert!(previous.is_some());
/// assert!(listener.is_empty());
/// assert_eq!(counter.load(Ordering::Relaxed), 1);
/// ```
#[derive(Debug)]
pub struct SharedListener<T> {
    slot: ArcSwapOption<T>,
}

impl<T> SharedListener<T> {
    /// Creates an empty slot.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slot: ArcSwapOption::const_empty(),
        }
    }

    /// Creates a slot holding `listener`.
    #[must_use]
    pub fn with_listener(listener: Arc<T>) -> Self {
        Self {
            slot: ArcSwapOption::new(Some(listener)),
        }
    }

    /// Replaces the stored listener. The last writer wins.
    pub fn set(&self, listener: Arc<T>) {
        self.slot.store(Some(listener));
    }

    /// Empties the slot.
    pub fn reset(&self) {
        self.slot.store(None);
    }

    /// Replaces the stored listener and returns the previous one.
    #[must_use = "use set() or reset() if the previous listener is not needed"]
    pub fn swap(&self, listener: Option<Arc<T>>) -> Option<Arc<T>> {
        self.slot.swap(listener)
    }

    /// Whether the slot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slot.load().is_none()
    }

    /// A new reference to the stored listener, if any.
    #[must_use]
    pub fn listener(&self) -> Option<Arc<T>> {
        self.slot.load_full()
    }

    /// Calls `operation` on the listener, if there is one.
    pub fn invoke(&self, operation: impl FnOnce(&T)) {
        self.invoke_with_result(operation);
    }

    /// Calls `operation` on the listener and returns its result, or `R::default()` if the slot
    /// is empty.
    ///
    /// The listener stays alive for the duration of the call even if the slot is changed
    /// concurrently.
    pub fn invoke_with_result<R: Default>(&self, operation: impl FnOnce(&T) -> R) -> R {
        let snapshot = self.slot.load_full();
        invoke_one(&snapshot, operation)
    }

    /// Moves the stored listener into a new slot, leaving this one empty.
    #[must_use]
    pub fn take(&self) -> Self {
        Self {
            slot: ArcSwapOption::new(self.slot.swap(None)),
        }
    }
}

impl<T> Default for SharedListener<T> {
    fn default() -> Self {
        Self::new()
    }
}
