//! Locking policies that pair a value with a mutual-exclusion primitive.
//!
//! A [`LockPolicy`] answers two questions for a chosen primitive: how is a value stored next to
//! the primitive, and which guard applies to exclusive (write) and shared (read) access. Callers
//! ask for a read or a write critical section and the policy picks the right guard, so nothing
//! downstream hardcodes which guard type belongs to which primitive.
//!
//! | Policy | Storage | Read guard | Reentrant | `Sync` |
//! |--------|---------|------------|-----------|--------|
//! | [`Recursive`] (default) | [`ReentrantCell`] over [`parking_lot::RawMutex`] | exclusive | yes | yes |
//! | [`Exclusive`] | [`parking_lot::Mutex`] | exclusive | no | yes |
//! | [`SharedExclusive`] | [`parking_lot::RwLock`] | shared ([`SharedLockGuard`]) | no | yes |
//! | [`Unsynchronized`] | [`ReentrantCell`] over [`NoopMutex`] | exclusive (no-op) | yes | no |
//!
//! Primitives that only support exclusive locking resolve both guards to an exclusive
//! acquisition.
//!
//! [`Unsynchronized`] turns synchronization off entirely. Types built on it are `!Sync`, which
//! makes the thread-safety switch a compile-time property: the same call sites work in both
//! modes and the compiler rejects cross-thread sharing of the unsynchronized variant.

use std::cell::RefCell;
use std::ops::{Deref, DerefMut};

use parking_lot::{Mutex, MutexGuard, RwLock, RwLockWriteGuard};

mod noop_mutex;
mod reentrant_cell;
mod shared_lock_guard;

pub use noop_mutex::*;
pub use reentrant_cell::*;
pub use shared_lock_guard::*;

/// Selects the storage and the lock guards used to protect a value.
///
/// Implemented by zero-sized marker types ([`Recursive`], [`Exclusive`], [`SharedExclusive`],
/// [`Unsynchronized`]) which are used as type parameters of
/// [`Guarded`][crate::Guarded], [`Listener`][crate::Listener] and
/// [`Listeners`][crate::Listeners].
pub trait LockPolicy {
    /// The value together with its primitive.
    type Lock<V>;

    /// Guard for a read critical section.
    type ReadGuard<'a, V>: Deref<Target = V>
    where
        V: 'a;

    /// Guard for a write critical section.
    type WriteGuard<'a, V>: DerefMut<Target = V>
    where
        V: 'a;

    /// Wraps `value` together with a fresh, unlocked primitive.
    fn new<V>(value: V) -> Self::Lock<V>;

    /// Acquires read access, blocking until it is available.
    fn read<'a, V>(lock: &'a Self::Lock<V>) -> Self::ReadGuard<'a, V>
    where
        V: 'a;

    /// Acquires read access if that is possible without blocking.
    fn try_read<'a, V>(lock: &'a Self::Lock<V>) -> Option<Self::ReadGuard<'a, V>>
    where
        V: 'a;

    /// Acquires write access, blocking until it is available.
    fn write<'a, V>(lock: &'a Self::Lock<V>) -> Self::WriteGuard<'a, V>
    where
        V: 'a;

    /// Acquires write access if that is possible without blocking.
    fn try_write<'a, V>(lock: &'a Self::Lock<V>) -> Option<Self::WriteGuard<'a, V>>
    where
        V: 'a;

    /// Accesses the value through an exclusive borrow, without locking.
    fn get_mut<V>(lock: &mut Self::Lock<V>) -> &mut V;

    /// Consumes the lock and returns the value.
    fn into_inner<V>(lock: Self::Lock<V>) -> V;
}

/// Reentrant mutual exclusion; the default policy.
///
/// The owning thread may take further read guards while it holds one, for example when a
/// listener callback queries the collection that is dispatching to it.
#[derive(Debug)]
#[non_exhaustive]
pub struct Recursive;

/// Plain (non-reentrant) mutual exclusion. Reads and writes both lock exclusively.
#[derive(Debug)]
#[non_exhaustive]
pub struct Exclusive;

/// Reader-writer locking. Any number of readers or a single writer.
#[derive(Debug)]
#[non_exhaustive]
pub struct SharedExclusive;

/// No synchronization at all, for values that never leave one thread.
#[derive(Debug)]
#[non_exhaustive]
pub struct Unsynchronized;

impl LockPolicy for Recursive {
    type Lock<V> = ReentrantCell<parking_lot::RawMutex, V>;
    type ReadGuard<'a, V>
        = CellReadGuard<'a, parking_lot::RawMutex, V>
    where
        V: 'a;
    type WriteGuard<'a, V>
        = CellWriteGuard<'a, parking_lot::RawMutex, V>
    where
        V: 'a;

    fn new<V>(value: V) -> Self::Lock<V> {
        ReentrantCell::new(RefCell::new(value))
    }

    fn read<'a, V>(lock: &'a Self::Lock<V>) -> Self::ReadGuard<'a, V>
    where
        V: 'a,
    {
        CellReadGuard::lock(lock)
    }

    fn try_read<'a, V>(lock: &'a Self::Lock<V>) -> Option<Self::ReadGuard<'a, V>>
    where
        V: 'a,
    {
        CellReadGuard::try_lock(lock)
    }

    fn write<'a, V>(lock: &'a Self::Lock<V>) -> Self::WriteGuard<'a, V>
    where
        V: 'a,
    {
        CellWriteGuard::lock(lock)
    }

    fn try_write<'a, V>(lock: &'a Self::Lock<V>) -> Option<Self::WriteGuard<'a, V>>
    where
        V: 'a,
    {
        CellWriteGuard::try_lock(lock)
    }

    fn get_mut<V>(lock: &mut Self::Lock<V>) -> &mut V {
        lock.get_mut().get_mut()
    }

    fn into_inner<V>(lock: Self::Lock<V>) -> V {
        lock.into_inner().into_inner()
    }
}

impl LockPolicy for Unsynchronized {
    type Lock<V> = ReentrantCell<NoopMutex, V>;
    type ReadGuard<'a, V>
        = CellReadGuard<'a, NoopMutex, V>
    where
        V: 'a;
    type WriteGuard<'a, V>
        = CellWriteGuard<'a, NoopMutex, V>
    where
        V: 'a;

    fn new<V>(value: V) -> Self::Lock<V> {
        ReentrantCell::new(RefCell::new(value))
    }

    fn read<'a, V>(lock: &'a Self::Lock<V>) -> Self::ReadGuard<'a, V>
    where
        V: 'a,
    {
        CellReadGuard::lock(lock)
    }

    fn try_read<'a, V>(lock: &'a Self::Lock<V>) -> Option<Self::ReadGuard<'a, V>>
    where
        V: 'a,
    {
        CellReadGuard::try_lock(lock)
    }

    fn write<'a, V>(lock: &'a Self::Lock<V>) -> Self::WriteGuard<'a, V>
    where
        V: 'a,
    {
        CellWriteGuard::lock(lock)
    }

    fn try_write<'a, V>(lock: &'a Self::Lock<V>) -> Option<Self::WriteGuard<'a, V>>
    where
        V: 'a,
    {
        CellWriteGuard::try_lock(lock)
    }

    fn get_mut<V>(lock: &mut Self::Lock<V>) -> &mut V {
        lock.get_mut().get_mut()
    }

    fn into_inner<V>(lock: Self::Lock<V>) -> V {
        lock.into_inner().into_inner()
    }
}

impl LockPolicy for Exclusive {
    type Lock<V> = Mutex<V>;
    type ReadGuard<'a, V>
        = MutexGuard<'a, V>
    where
        V: 'a;
    type WriteGuard<'a, V>
        = MutexGuard<'a, V>
    where
        V: 'a;

    fn new<V>(value: V) -> Self::Lock<V> {
        Mutex::new(value)
    }

    fn read<'a, V>(lock: &'a Self::Lock<V>) -> Self::ReadGuard<'a, V>
    where
        V: 'a,
    {
        lock.lock()
    }

    fn try_read<'a, V>(lock: &'a Self::Lock<V>) -> Option<Self::ReadGuard<'a, V>>
    where
        V: 'a,
    {
        lock.try_lock()
    }

    fn write<'a, V>(lock: &'a Self::Lock<V>) -> Self::WriteGuard<'a, V>
    where
        V: 'a,
    {
        lock.lock()
    }

    fn try_write<'a, V>(lock: &'a Self::Lock<V>) -> Option<Self::WriteGuard<'a, V>>
    where
        V: 'a,
    {
        lock.try_lock()
    }

    fn get_mut<V>(lock: &mut Self::Lock<V>) -> &mut V {
        lock.get_mut()
    }

    fn into_inner<V>(lock: Self::Lock<V>) -> V {
        lock.into_inner()
    }
}

impl LockPolicy for SharedExclusive {
    type Lock<V> = RwLock<V>;
    type ReadGuard<'a, V>
        = SharedLockGuard<'a, V>
    where
        V: 'a;
    type WriteGuard<'a, V>
        = RwLockWriteGuard<'a, V>
    where
        V: 'a;

    fn new<V>(value: V) -> Self::Lock<V> {
        RwLock::new(value)
    }

    fn read<'a, V>(lock: &'a Self::Lock<V>) -> Self::ReadGuard<'a, V>
    where
        V: 'a,
    {
        SharedLockGuard::new(lock)
    }

    fn try_read<'a, V>(lock: &'a Self::Lock<V>) -> Option<Self::ReadGuard<'a, V>>
    where
        V: 'a,
    {
        SharedLockGuard::try_new(lock)
    }

    fn write<'a, V>(lock: &'a Self::Lock<V>) -> Self::WriteGuard<'a, V>
    where
        V: 'a,
    {
        lock.write()
    }

    fn try_write<'a, V>(lock: &'a Self::Lock<V>) -> Option<Self::WriteGuard<'a, V>>
    where
        V: 'a,
    {
        lock.try_write()
    }

    fn get_mut<V>(lock: &mut Self::Lock<V>) -> &mut V {
        lock.get_mut()
    }

    fn into_inner<V>(lock: Self::Lock<V>) -> V {
        lock.into_inner()
    }
}
