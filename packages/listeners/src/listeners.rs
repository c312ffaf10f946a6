use tracing::trace;

use crate::invoke::{Sequence, apply_each, invoke_many};
use crate::{AddResult, Guarded, Handle, LockPolicy, Recursive, RemoveResult, Unsynchronized};

/// An ordered set of listeners.
///
/// Listeners are stored as [`Handle`]s in insertion order. A listener can be present at most once,
/// where "the same listener" means the same target object ([`Handle::same()`]). Empty handles are
/// never stored.
///
/// # Dispatch
///
/// [`invoke()`][Self::invoke] and [`apply()`][Self::apply] visit the listeners in order. The lock
/// is taken separately for each step and is never held while a listener runs, so a callback may
/// add or remove listeners (itself included) or clear the collection. Changes made from a
/// callback on the dispatching thread are honored by the rest of the same dispatch: a removed
/// listener that has not been visited yet is not called, an added one is called, and no listener
/// is called twice or skipped because others were removed.
///
/// Changes made by other threads during a dispatch may also become visible to it, but without
/// that guarantee: a listener present for the whole dispatch can be missed when another thread
/// removes an earlier one at the same moment.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use listeners::{AddResult, Listeners, RemoveResult};
///
/// trait Observer: Send + Sync {
///     fn on_value(&self, value: u32);
/// }
///
/// struct Printer;
///
/// impl Observer for Printer {
///     fn on_value(&self, value: u32) {
///         println!("got {value}");
///     }
/// }
///
/// let observers = Listeners::<Option<Arc<dyn Observer>>>::new();
/// let printer: Arc<dyn Observer> = Arc::new(Printer);
///
/// assert_eq!(observers.add(Some(Arc::clone(&printer))), AddResult::OkFirst);
/// assert_eq!(observers.add(Some(Arc::clone(&printer))), AddResult::Duplicate);
///
/// observers.invoke(|observer| observer.on_value(42));
///
/// assert_eq!(observers.remove(&Some(printer)), RemoveResult::OkLast);
/// ```
#[derive(Debug)]
pub struct Listeners<H: Handle, P: LockPolicy = Recursive> {
    handles: Guarded<Vec<H>, P>,
}

/// A [`Listeners`] collection without synchronization, for use on a single thread.
pub type LocalListeners<H> = Listeners<H, Unsynchronized>;

impl<H: Handle, P: LockPolicy> Listeners<H, P> {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            // Most collections have exactly one listener.
            handles: Guarded::new(Vec::with_capacity(1)),
        }
    }

    /// Appends a listener.
    ///
    /// Returns [`AddResult::NullInput`] for an empty handle and [`AddResult::Duplicate`] if the
    /// listener is already present. Otherwise the listener is added and the result tells whether
    /// it is the only one.
    pub fn add(&self, listener: H) -> AddResult {
        if listener.is_vacant() {
            return AddResult::NullInput;
        }

        let count = {
            let mut handles = self.handles.write();

            if handles.iter().any(|existing| existing.same(&listener)) {
                return AddResult::Duplicate;
            }

            handles.push(listener);
            handles.len()
        };

        trace!(count, "listener added");

        if count == 1 {
            AddResult::OkFirst
        } else {
            AddResult::Ok
        }
    }

    /// Removes a listener.
    ///
    /// Returns [`RemoveResult::NullInput`] both for an empty handle and for a listener that is not
    /// present. Otherwise the result tells whether the collection is now empty.
    pub fn remove(&self, listener: &H) -> RemoveResult {
        if listener.is_vacant() {
            return RemoveResult::NullInput;
        }

        let (removed, remaining) = {
            let mut handles = self.handles.write();

            let Some(position) = handles.iter().position(|existing| existing.same(listener))
            else {
                return RemoveResult::NullInput;
            };

            (handles.remove(position), handles.len())
        };

        // The handle may own the last reference to the listener, whose destructor may call back
        // into this collection.
        drop(removed);

        trace!(remaining, "listener removed");

        if remaining == 0 {
            RemoveResult::OkLast
        } else {
            RemoveResult::Ok
        }
    }

    /// Whether `listener` is present.
    ///
    /// An empty handle, including an expired weak handle, is never present.
    #[must_use]
    pub fn contains(&self, listener: &H) -> bool {
        !listener.is_vacant()
            && self
                .handles
                .read()
                .iter()
                .any(|existing| existing.same(listener))
    }

    /// Removes all listeners. Returns whether there were any.
    pub fn clear(&self) -> bool {
        let previous = self.handles.replace(Vec::new());
        let had_listeners = !previous.is_empty();

        drop(previous);

        if had_listeners {
            trace!("listeners cleared");
        }

        had_listeners
    }

    /// Whether there is no usable listener.
    ///
    /// Weak handles whose targets have been dropped do not count, even before they are removed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.read().iter().all(Handle::is_vacant)
    }

    /// Number of stored handles, including weak handles whose targets have been dropped.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.read().len()
    }

    /// Calls `operation` on every listener, in order.
    ///
    /// Empty and expired handles are skipped.
    pub fn invoke(&self, operation: impl FnMut(&H::Target)) {
        invoke_many(&self.steps(), operation);
    }

    /// Passes every listener, in its strong form, to `functor`, in order.
    ///
    /// Weak handles are upgraded for the duration of the call; expired ones are skipped.
    pub fn apply(&self, functor: impl FnMut(H::Strong)) {
        apply_each(&self.steps(), functor);
    }

    /// A copy of the stored handles, in order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<H> {
        self.handles.get()
    }

    /// Removes weak handles whose targets have been dropped. Returns how many were removed.
    #[expect(
        clippy::arithmetic_side_effects,
        reason = "retain() never grows the collection"
    )]
    pub fn prune_expired(&self) -> usize {
        let removed = {
            let mut handles = self.handles.write();

            let before = handles.len();
            handles.retain(|existing| !existing.is_vacant());
            before - handles.len()
        };

        if removed > 0 {
            trace!(removed, "expired listeners pruned");
        }

        removed
    }

    /// Moves all listeners into a new collection, leaving this one empty.
    #[must_use]
    pub fn take(&self) -> Self {
        Self {
            handles: Guarded::new(self.handles.replace(Vec::with_capacity(1))),
        }
    }

    fn steps(&self) -> Steps<'_, H, P> {
        Steps {
            handles: &self.handles,
        }
    }
}

impl<H: Handle, P: LockPolicy> Default for Listeners<H, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Handle, P: LockPolicy> Clone for Listeners<H, P> {
    /// Copies the handles, taken under a read lock on the source.
    fn clone(&self) -> Self {
        Self {
            handles: Guarded::new(self.snapshot()),
        }
    }
}

// Reads the collection one element at a time, taking the lock anew for each read.
struct Steps<'a, H, P: LockPolicy> {
    handles: &'a Guarded<Vec<H>, P>,
}

impl<H: Clone, P: LockPolicy> Sequence<H> for Steps<'_, H, P> {
    fn get(&self, index: usize) -> Option<H> {
        self.handles.read().get(index).cloned()
    }
}
