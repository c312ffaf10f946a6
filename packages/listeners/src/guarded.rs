use std::fmt;
use std::mem;

use crate::{LockPolicy, Recursive};

/// A value owned together with the primitive that protects it.
///
/// There are three ways to reach the value:
///
/// * Scoped locking via [`read()`][Self::read] and [`write()`][Self::write]. The guard covers any
///   number of operations and releases the lock on every exit path when it is dropped. This is
///   the way to make a sequence of operations on a composite value appear atomic.
/// * Synchronized single operations: [`set()`][Self::set], [`replace()`][Self::replace] and
///   [`get()`][Self::get] take the lock internally.
/// * Unsynchronized access through an exclusive borrow: [`get_mut()`][Self::get_mut],
///   [`take()`][Self::take], [`exchange()`][Self::exchange] and
///   [`into_inner()`][Self::into_inner]. The borrow checker proves that no other party can hold
///   a guard at that time, so no lock is needed.
///
/// The type is not `Clone`. Copying a guarded value is done by the owning layer,
/// under a read guard.
///
/// # Example
///
/// ```
/// use listeners::Guarded;
///
/// let names = Guarded::<Vec<&str>>::new(vec!["first"]);
///
/// {
///     let mut names = names.write();
///     names.push("second");
///     names.push("third");
/// }
///
/// assert_eq!(names.read().len(), 3);
/// assert_eq!(names.get(), vec!["first", "second", "third"]);
/// ```
pub struct Guarded<V, P: LockPolicy = Recursive> {
    lock: P::Lock<V>,
}

impl<V, P: LockPolicy> Guarded<V, P> {
    /// Creates an instance holding `value`, protected by a fresh primitive.
    #[must_use]
    pub fn new(value: V) -> Self {
        Self {
            lock: P::new(value),
        }
    }

    /// Acquires a read (shared) critical section.
    ///
    /// With exclusive-only policies this is an exclusive acquisition.
    ///
    /// # Panics
    ///
    /// With a reentrant policy, panics if the current thread holds a write guard on this value.
    #[must_use]
    pub fn read(&self) -> P::ReadGuard<'_, V> {
        P::read(&self.lock)
    }

    /// Acquires a read critical section if that is possible without blocking.
    #[must_use]
    pub fn try_read(&self) -> Option<P::ReadGuard<'_, V>> {
        P::try_read(&self.lock)
    }

    /// Acquires a write (exclusive) critical section.
    ///
    /// # Panics
    ///
    /// With a reentrant policy, panics if the current thread holds any other guard on this value.
    #[must_use]
    pub fn write(&self) -> P::WriteGuard<'_, V> {
        P::write(&self.lock)
    }

    /// Acquires a write critical section if that is possible without blocking.
    #[must_use]
    pub fn try_write(&self) -> Option<P::WriteGuard<'_, V>> {
        P::try_write(&self.lock)
    }

    /// Replaces the value under a write lock.
    ///
    /// The previous value is dropped after the lock has been released, so its destructor may
    /// safely touch this instance again.
    pub fn set(&self, value: V) {
        drop(self.replace(value));
    }

    /// Replaces the value under a write lock and returns the previous value.
    #[must_use = "use set() if the previous value is not needed"]
    pub fn replace(&self, value: V) -> V {
        mem::replace(&mut *self.write(), value)
    }

    /// Returns a copy of the value, taken under a read lock.
    #[must_use]
    pub fn get(&self) -> V
    where
        V: Clone,
    {
        self.read().clone()
    }

    /// Accesses the value without locking.
    #[must_use]
    pub fn get_mut(&mut self) -> &mut V {
        P::get_mut(&mut self.lock)
    }

    /// Moves the value out without locking, leaving the default value in its place.
    #[must_use]
    pub fn take(&mut self) -> V
    where
        V: Default,
    {
        mem::take(self.get_mut())
    }

    /// Swaps in `value` without locking and returns the previous value.
    #[must_use = "use get_mut() to overwrite the value if the previous value is not needed"]
    pub fn exchange(&mut self, value: V) -> V {
        mem::replace(self.get_mut(), value)
    }

    /// Consumes the instance and returns the value.
    #[must_use]
    pub fn into_inner(self) -> V {
        P::into_inner(self.lock)
    }
}

impl<V: Default, P: LockPolicy> Default for Guarded<V, P> {
    fn default() -> Self {
        Self::new(V::default())
    }
}

impl<V, P: LockPolicy> From<V> for Guarded<V, P> {
    fn from(value: V) -> Self {
        Self::new(value)
    }
}

impl<V: fmt::Debug, P: LockPolicy> fmt::Debug for Guarded<V, P> {
    #[cfg_attr(test, mutants::skip)] // No API contract to test.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("Guarded");

        match self.try_read() {
            Some(value) => d.field("value", &&*value),
            None => d.field("value", &format_args!("<locked>")),
        };

        d.finish()
    }
}
