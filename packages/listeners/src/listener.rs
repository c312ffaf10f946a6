use crate::invoke::invoke_one;
use crate::{Guarded, Handle, LockPolicy, Recursive, Unsynchronized};

/// A slot for at most one listener.
///
/// The listener is stored as a [`Handle`]: a plain reference, a shared (`Arc`/`Rc`) reference or
/// a weak reference. Dispatching to an empty slot, or to a weak handle whose target has been
/// dropped, does nothing and produces `R::default()`.
///
/// The slot is protected by the lock policy `P` ([`Recursive`] by default). Every operation takes
/// the lock only for as long as it takes to read or replace the handle. In particular, the
/// listener is called with the lock released, so a callback may freely `set()` or `reset()` the
/// slot it was called from.
///
/// For shared-ownership listeners that are `Send + Sync`, [`SharedListener`][crate::SharedListener]
/// offers the same operations without a lock.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicU32, Ordering};
///
/// use listeners::Listener;
///
/// let received = Arc::new(AtomicU32::new(0));
/// let listener = Listener::<Option<Arc<AtomicU32>>>::new();
///
/// // Nobody is listening yet, so nothing happens.
/// listener.invoke(|target| target.store(1, Ordering::Relaxed));
///
/// listener.set(Some(Arc::clone(&received)));
/// listener.invoke(|target| target.store(42, Ordering::Relaxed));
///
/// assert_eq!(received.load(Ordering::Relaxed), 42);
/// ```
#[derive(Debug)]
pub struct Listener<H: Handle, P: LockPolicy = Recursive> {
    slot: Guarded<Option<H>, P>,
}

/// A [`Listener`] without synchronization, for use on a single thread.
pub type LocalListener<H> = Listener<H, Unsynchronized>;

impl<H: Handle, P: LockPolicy> Listener<H, P> {
    /// Creates an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slot: Guarded::new(None),
        }
    }

    /// Creates a slot holding `listener`.
    #[must_use]
    pub fn with_listener(listener: H) -> Self {
        Self {
            slot: Guarded::new(non_empty(listener)),
        }
    }

    /// Replaces the stored listener. The last writer wins.
    ///
    /// An empty handle empties the slot. The previous handle is released after the lock.
    pub fn set(&self, listener: H) {
        self.slot.set(non_empty(listener));
    }

    /// Empties the slot.
    pub fn reset(&self) {
        self.slot.set(None);
    }

    /// Whether the slot holds no usable listener.
    ///
    /// A weak handle whose target has been dropped counts as empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slot.read().as_ref().is_none_or(Handle::is_vacant)
    }

    /// A copy of the stored handle, if any.
    #[must_use]
    pub fn listener(&self) -> Option<H> {
        self.slot.get()
    }

    /// Calls `operation` on the listener, if there is one.
    pub fn invoke(&self, operation: impl FnOnce(&H::Target)) {
        self.invoke_with_result(operation);
    }

    /// Calls `operation` on the listener and returns its result, or `R::default()` if the slot
    /// is empty.
    ///
    /// The handle is read once under the lock. The same snapshot is then checked and called with
    /// the lock released, so a concurrent `set()` cannot make the check and the call disagree.
    pub fn invoke_with_result<R: Default>(&self, operation: impl FnOnce(&H::Target) -> R) -> R {
        self.listener()
            .map_or_else(R::default, |handle| invoke_one(&handle, operation))
    }

    /// Moves the stored listener into a new slot, leaving this one empty.
    #[must_use]
    pub fn take(&self) -> Self {
        Self {
            slot: Guarded::new(self.slot.replace(None)),
        }
    }
}

impl<H: Handle, P: LockPolicy> Default for Listener<H, P> {
    fn default() -> Self {
        Self::new()
    }
}

fn non_empty<H: Handle>(listener: H) -> Option<H> {
    (!listener.is_vacant()).then_some(listener)
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;
    use std::sync::{Arc, Weak};
    use std::thread;

    use static_assertions::{assert_impl_all, assert_not_impl_any};

    use super::*;
    use crate::test_utils::Recorder;
    use crate::{Exclusive, SharedExclusive};

    assert_impl_all!(Listener<Option<Arc<Recorder>>>: Send, Sync);
    assert_impl_all!(Listener<Weak<Recorder>, SharedExclusive>: Send, Sync);
    assert_impl_all!(Listener<Option<&'static Recorder>, Exclusive>: Send, Sync);
    assert_impl_all!(LocalListener<Option<Arc<Recorder>>>: Send);
    assert_not_impl_any!(LocalListener<Option<Arc<Recorder>>>: Sync);
    assert_not_impl_any!(LocalListener<Option<Rc<Recorder>>>: Send, Sync);
    assert_not_impl_any!(Listener<Option<Arc<Recorder>>>: Clone);

    #[test]
    fn set_invoke_reset() {
        let a = Recorder::default();
        let listener = Listener::<Option<&Recorder>>::new();
        assert!(listener.is_empty());

        listener.set(Some(&a));
        assert!(!listener.is_empty());
        listener.invoke(|recorder| recorder.notify(42));
        assert_eq!(a.calls(), 1);
        assert_eq!(a.last(), Some(42));

        listener.reset();
        assert!(listener.is_empty());
        listener.invoke(|recorder| recorder.notify(42));
        assert_eq!(a.calls(), 1);
    }

    #[test]
    fn set_empty_handle_empties_slot() {
        let a = Arc::new(Recorder::default());
        let listener = Listener::<Option<Arc<Recorder>>>::with_listener(Some(Arc::clone(&a)));

        listener.set(None);

        assert!(listener.is_empty());
        assert!(listener.listener().is_none());
        assert_eq!(Arc::strong_count(&a), 1);
    }

    #[test]
    fn invoke_with_result_default_when_empty() {
        let listener = Listener::<Option<Arc<Recorder>>, Exclusive>::default();

        let result = listener.invoke_with_result(|_| 5_u32);

        assert_eq!(result, 0);
    }

    #[test]
    fn invoke_with_result_returns_value() {
        let listener =
            Listener::<Arc<Recorder>>::with_listener(Arc::new(Recorder::default()));

        let result = listener.invoke_with_result(|recorder| {
            recorder.notify(3);
            recorder.calls()
        });

        assert_eq!(result, 1);
    }

    #[test]
    fn weak_listener_expires() {
        let target = Arc::new(Recorder::default());
        let listener = Listener::<Weak<Recorder>>::with_listener(Arc::downgrade(&target));
        assert!(!listener.is_empty());

        drop(target);

        assert!(listener.is_empty());
        let called = listener.invoke_with_result(|_| true);
        assert!(!called);
    }

    #[test]
    fn take_moves_listener() {
        let a = Recorder::default();
        let source = LocalListener::<Option<&Recorder>>::with_listener(Some(&a));

        let destination = source.take();

        assert!(source.is_empty());
        assert!(!destination.is_empty());
        destination.invoke(|recorder| recorder.notify(1));
        assert_eq!(a.calls(), 1);
    }

    #[test]
    fn callback_may_reset_own_slot() {
        let a = Recorder::default();
        let listener = Listener::<Option<&Recorder>, Exclusive>::with_listener(Some(&a));

        // With a non-reentrant primitive this deadlocks if the lock is held during the call.
        listener.invoke(|recorder| {
            recorder.notify(1);
            listener.reset();
        });

        assert!(listener.is_empty());
        assert_eq!(a.calls(), 1);
    }

    #[test]
    fn local_listener_with_rc() {
        let target = Rc::new(Recorder::default());
        let listener = LocalListener::<Option<Rc<Recorder>>>::new();

        listener.set(Some(Rc::clone(&target)));
        listener.invoke(|recorder| recorder.notify(8));

        assert_eq!(target.last(), Some(8));
    }

    #[test]
    fn concurrent_set_and_invoke() {
        let a = Arc::new(Recorder::default());
        let b = Arc::new(Recorder::default());
        let listener = Arc::new(Listener::<Option<Arc<Recorder>>>::new());

        let threads = [Arc::clone(&a), Arc::clone(&b)]
            .into_iter()
            .map(|target| {
                let listener = Arc::clone(&listener);

                thread::spawn(move || {
                    for _ in 0..100 {
                        listener.set(Some(Arc::clone(&target)));
                        listener.invoke(|recorder| recorder.notify(1));
                    }
                })
            })
            .collect::<Vec<_>>();

        for thread in threads {
            thread.join().unwrap();
        }

        // Every invoke found one of the two listeners in the slot.
        assert_eq!(a.calls() + b.calls(), 200);
    }
}
