use std::mem;
use std::num::NonZeroU64;
use std::sync::Arc;

use tracing::trace;

use crate::invoke::{Sequence, apply_each, invoke_many};
use crate::{
    ERR_KEY_SPACE_EXHAUSTED, Guarded, Handle, ListenerKey, LockPolicy, Recursive, Unsynchronized,
};

/// An ordered collection of listeners that the collection owns.
///
/// Unlike [`Listeners`][crate::Listeners], the caller hands over ownership of each listener and
/// gets a [`ListenerKey`] back. The key is what identifies the listener from then on, for removal
/// and membership tests. This makes it possible to register closures and other values that have
/// no identity of their own.
///
/// Dispatch follows the same rules as for [`Listeners`][crate::Listeners]: no lock is held while a
/// listener runs, and a listener may remove itself or others from within its callback.
///
/// # Example
///
/// ```
/// use std::sync::atomic::{AtomicU32, Ordering};
///
/// use listeners::BoxedListeners;
///
/// let total = AtomicU32::new(0);
/// let listeners = BoxedListeners::<dyn Fn(u32) + Send + Sync + '_>::new();
///
/// let doubler = listeners.add(Box::new(|value| {
///     total.fetch_add(value * 2, Ordering::Relaxed);
/// }));
/// listeners.add(Box::new(|value| {
///     total.fetch_add(value, Ordering::Relaxed);
/// }));
///
/// listeners.invoke(|listener| listener(10));
/// assert_eq!(total.load(Ordering::Relaxed), 30);
///
/// assert_eq!(listeners.remove(doubler), Some(doubler));
/// listeners.invoke(|listener| listener(10));
/// assert_eq!(total.load(Ordering::Relaxed), 40);
/// ```
#[derive(derive_more::Debug)]
pub struct BoxedListeners<T: ?Sized, P: LockPolicy = Recursive> {
    #[debug(ignore)]
    registry: Guarded<Registry<T>, P>,
}

/// A [`BoxedListeners`] collection without synchronization, for use on a single thread.
pub type LocalBoxedListeners<T> = BoxedListeners<T, Unsynchronized>;

impl<T: ?Sized, P: LockPolicy> BoxedListeners<T, P> {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: Guarded::new(Registry {
                entries: Vec::with_capacity(1),
                next_key: NonZeroU64::MIN,
            }),
        }
    }

    /// Takes ownership of `listener`, appends it and returns its key.
    ///
    /// # Panics
    ///
    /// Panics if more than `u64::MAX` listeners have been added to this collection over its
    /// lifetime.
    pub fn add(&self, listener: Box<T>) -> ListenerKey {
        let listener = Arc::from(listener);

        let (key, count) = {
            let mut registry = self.registry.write();

            let key = registry.issue_key();
            registry.entries.push(Entry { key, listener });

            (key, registry.entries.len())
        };

        trace!(%key, count, "listener added");

        key
    }

    /// Removes and drops the listener with the given key.
    ///
    /// Returns the key if the listener was present, `None` otherwise.
    pub fn remove(&self, key: ListenerKey) -> Option<ListenerKey> {
        let (removed, remaining) = {
            let mut registry = self.registry.write();

            let position = registry.entries.iter().position(|entry| entry.key == key)?;

            (registry.entries.remove(position), registry.entries.len())
        };

        // The destructor of the listener runs without the lock held.
        drop(removed);

        trace!(%key, remaining, "listener removed");

        Some(key)
    }

    /// Whether a listener with the given key is present.
    #[must_use]
    pub fn contains(&self, key: ListenerKey) -> bool {
        self.registry
            .read()
            .entries
            .iter()
            .any(|entry| entry.key == key)
    }

    /// Removes and drops all listeners. Returns whether there were any.
    ///
    /// Keys issued before are not issued again afterwards.
    pub fn clear(&self) -> bool {
        let previous = {
            let mut registry = self.registry.write();
            mem::take(&mut registry.entries)
        };

        let had_listeners = !previous.is_empty();

        drop(previous);

        if had_listeners {
            trace!("listeners cleared");
        }

        had_listeners
    }

    /// Whether the collection has no listeners.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registry.read().entries.is_empty()
    }

    /// Number of listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registry.read().entries.len()
    }

    /// Calls `operation` on every listener, in order.
    pub fn invoke(&self, operation: impl FnMut(&T)) {
        invoke_many(&self.steps(), operation);
    }

    /// Calls `functor` with the key and a reference to every listener, in order.
    pub fn apply(&self, mut functor: impl FnMut(ListenerKey, &T)) {
        apply_each(&self.steps(), |entry: Entry<T>| {
            functor(entry.key, &entry.listener);
        });
    }

    /// Moves all listeners into a new collection, leaving this one empty.
    ///
    /// The new collection continues issuing keys after the last one issued here, so keys stay
    /// unique across both.
    #[must_use]
    pub fn take(&self) -> Self {
        let mut registry = self.registry.write();

        Self {
            registry: Guarded::new(Registry {
                entries: mem::take(&mut registry.entries),
                next_key: registry.next_key,
            }),
        }
    }

    fn steps(&self) -> Steps<'_, T, P> {
        Steps {
            registry: &self.registry,
        }
    }
}

impl<T: ?Sized, P: LockPolicy> Default for BoxedListeners<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

struct Registry<T: ?Sized> {
    entries: Vec<Entry<T>>,

    // Keys are never reused, so we only ever count up.
    next_key: NonZeroU64,
}

impl<T: ?Sized> Registry<T> {
    fn issue_key(&mut self) -> ListenerKey {
        let key = ListenerKey::new(self.next_key);

        self.next_key = self
            .next_key
            .checked_add(1)
            .expect(ERR_KEY_SPACE_EXHAUSTED);

        key
    }
}

struct Entry<T: ?Sized> {
    key: ListenerKey,

    // Shared with dispatch, so a listener removed mid-dispatch stays alive until that dispatch
    // ends.
    listener: Arc<T>,
}

impl<T: ?Sized> Clone for Entry<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            listener: Arc::clone(&self.listener),
        }
    }
}

impl<T: ?Sized> Handle for Entry<T> {
    type Target = T;
    type Strong = Self;

    fn is_vacant(&self) -> bool {
        false
    }

    fn to_strong(&self) -> Option<Self::Strong> {
        Some(self.clone())
    }

    fn with_target<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        Some(f(&self.listener))
    }

    fn same(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

struct Steps<'a, T: ?Sized, P: LockPolicy> {
    registry: &'a Guarded<Registry<T>, P>,
}

impl<T: ?Sized, P: LockPolicy> Sequence<Entry<T>> for Steps<'_, T, P> {
    fn get(&self, index: usize) -> Option<Entry<T>> {
        self.registry.read().entries.get(index).cloned()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use static_assertions::{assert_impl_all, assert_not_impl_any};

    use super::*;
    use crate::test_utils::Recorder;

    type Callback = dyn Fn(u32) + Send + Sync;

    assert_impl_all!(BoxedListeners<Callback>: Send, Sync);
    assert_impl_all!(BoxedListeners<Recorder>: Send, Sync);
    assert_impl_all!(LocalBoxedListeners<Recorder>: Send);
    assert_not_impl_any!(LocalBoxedListeners<Recorder>: Sync);
    assert_not_impl_any!(BoxedListeners<dyn Fn(u32)>: Send, Sync);

    #[test]
    fn keys_are_unique_and_never_reused() {
        let listeners = BoxedListeners::<Recorder>::new();

        let first = listeners.add(Box::default());
        let second = listeners.add(Box::default());
        assert_ne!(first, second);

        assert_eq!(listeners.remove(second), Some(second));
        let third = listeners.add(Box::default());
        assert_ne!(third, second);
        assert_ne!(third, first);

        assert!(listeners.clear());
        let fourth = listeners.add(Box::default());
        assert!(![first, second, third].contains(&fourth));
    }

    #[test]
    fn remove_and_contains() {
        let listeners = BoxedListeners::<Recorder>::new();
        let key = listeners.add(Box::default());

        assert!(listeners.contains(key));
        assert_eq!(listeners.len(), 1);

        assert_eq!(listeners.remove(key), Some(key));
        assert!(!listeners.contains(key));
        assert!(listeners.is_empty());

        assert_eq!(listeners.remove(key), None);
    }

    #[test]
    fn remove_drops_listener() {
        struct Tracked(Rc<Cell<bool>>);

        impl Drop for Tracked {
            fn drop(&mut self) {
                self.0.set(true);
            }
        }

        let dropped = Rc::new(Cell::new(false));
        let listeners = LocalBoxedListeners::<Tracked>::new();
        let key = listeners.add(Box::new(Tracked(Rc::clone(&dropped))));

        assert!(!dropped.get());
        listeners.remove(key);
        assert!(dropped.get());
    }

    #[test]
    fn invoke_closures() {
        let calls = AtomicUsize::new(0);
        let listeners = BoxedListeners::<dyn Fn(u32) + Send + Sync + '_>::new();

        listeners.add(Box::new(|_| {
            calls.fetch_add(1, Ordering::Relaxed);
        }));
        listeners.add(Box::new(|value| {
            calls.fetch_add(usize::try_from(value).unwrap(), Ordering::Relaxed);
        }));

        listeners.invoke(|listener| listener(10));

        assert_eq!(calls.load(Ordering::Relaxed), 11);
    }

    #[test]
    fn apply_passes_keys() {
        let listeners = BoxedListeners::<Recorder>::new();
        let first = listeners.add(Box::default());
        let second = listeners.add(Box::default());

        let mut seen = Vec::new();
        listeners.apply(|key, recorder| {
            recorder.notify(1);
            seen.push(key);
        });

        assert_eq!(seen, vec![first, second]);
    }

    #[test]
    fn callback_removes_itself_and_next() {
        let listeners = BoxedListeners::<Recorder>::new();
        let a = listeners.add(Box::default());
        let b = listeners.add(Box::default());
        let c = listeners.add(Box::default());

        let mut seen = Vec::new();
        listeners.apply(|key, _| {
            seen.push(key);

            if key == a {
                listeners.remove(a);
                listeners.remove(b);
            }
        });

        assert_eq!(seen, vec![a, c]);
        assert_eq!(listeners.len(), 1);
        assert!(listeners.contains(c));
    }

    #[test]
    fn callback_removes_two_earlier_listeners() {
        let listeners = BoxedListeners::<Recorder>::new();
        let a = listeners.add(Box::default());
        let b = listeners.add(Box::default());
        let c = listeners.add(Box::default());
        let d = listeners.add(Box::default());

        let mut seen = Vec::new();
        listeners.apply(|key, _| {
            seen.push(key);

            if key == c {
                listeners.remove(a);
                listeners.remove(b);
            }
        });

        assert_eq!(seen, vec![a, b, c, d]);
        assert_eq!(listeners.len(), 2);
    }

    #[test]
    fn take_continues_key_sequence() {
        let source = BoxedListeners::<Recorder>::new();
        let first = source.add(Box::default());

        let destination = source.take();
        let second = destination.add(Box::default());

        assert!(source.is_empty());
        assert!(destination.contains(first));
        assert_ne!(first, second);
    }
}
