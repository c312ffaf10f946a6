use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::ops::{Deref, DerefMut};

use parking_lot::lock_api::{self, RawMutex};

use crate::ERR_ALREADY_BORROWED;

/// A value behind a reentrant mutex built on the primitive `R`.
///
/// The mutex keeps other threads out. The value itself sits in a [`RefCell`] so that a thread
/// that re-enters the mutex can only ever obtain shared references, or one exclusive reference,
/// never both at once.
pub type ReentrantCell<R, V> = lock_api::ReentrantMutex<R, parking_lot::RawThreadId, RefCell<V>>;

type HeldCell<'a, R, V> =
    lock_api::ReentrantMutexGuard<'a, R, parking_lot::RawThreadId, RefCell<V>>;

/// Read access to the value of a [`ReentrantCell`]. Releases the mutex when dropped.
pub struct CellReadGuard<'a, R: RawMutex, V> {
    // Fields drop in declaration order, so the borrow ends before the mutex is released.
    value: Ref<'a, V>,
    _held: HeldCell<'a, R, V>,
}

impl<'a, R: RawMutex, V> CellReadGuard<'a, R, V> {
    /// # Panics
    ///
    /// Panics if the current thread holds a write guard on the same cell.
    pub(crate) fn lock(cell: &'a ReentrantCell<R, V>) -> Self {
        Self::borrow(cell.lock()).expect(ERR_ALREADY_BORROWED)
    }

    pub(crate) fn try_lock(cell: &'a ReentrantCell<R, V>) -> Option<Self> {
        cell.try_lock().and_then(Self::borrow)
    }

    fn borrow(held: HeldCell<'a, R, V>) -> Option<Self> {
        let cell: *const RefCell<V> = &*held;

        // SAFETY: The cell lives in the mutex, which is borrowed for 'a. The borrow taken here is
        // stored next to `held` and dropped before it, so it is only used while this thread
        // holds the mutex.
        let value = unsafe { &*cell }.try_borrow().ok()?;

        Some(Self { value, _held: held })
    }
}

impl<R: RawMutex, V> Deref for CellReadGuard<'_, R, V> {
    type Target = V;

    fn deref(&self) -> &V {
        &self.value
    }
}

impl<R: RawMutex, V: fmt::Debug> fmt::Debug for CellReadGuard<'_, R, V> {
    #[cfg_attr(test, mutants::skip)] // No API contract to test.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.value, f)
    }
}

/// Write access to the value of a [`ReentrantCell`]. Releases the mutex when dropped.
pub struct CellWriteGuard<'a, R: RawMutex, V> {
    // Fields drop in declaration order, so the borrow ends before the mutex is released.
    value: RefMut<'a, V>,
    _held: HeldCell<'a, R, V>,
}

impl<'a, R: RawMutex, V> CellWriteGuard<'a, R, V> {
    /// # Panics
    ///
    /// Panics if the current thread holds any other guard on the same cell.
    pub(crate) fn lock(cell: &'a ReentrantCell<R, V>) -> Self {
        Self::borrow(cell.lock()).expect(ERR_ALREADY_BORROWED)
    }

    pub(crate) fn try_lock(cell: &'a ReentrantCell<R, V>) -> Option<Self> {
        cell.try_lock().and_then(Self::borrow)
    }

    fn borrow(held: HeldCell<'a, R, V>) -> Option<Self> {
        let cell: *const RefCell<V> = &*held;

        // SAFETY: The cell lives in the mutex, which is borrowed for 'a. The borrow taken here is
        // stored next to `held` and dropped before it, so it is only used while this thread
        // holds the mutex.
        let value = unsafe { &*cell }.try_borrow_mut().ok()?;

        Some(Self { value, _held: held })
    }
}

impl<R: RawMutex, V> Deref for CellWriteGuard<'_, R, V> {
    type Target = V;

    fn deref(&self) -> &V {
        &self.value
    }
}

impl<R: RawMutex, V> DerefMut for CellWriteGuard<'_, R, V> {
    fn deref_mut(&mut self) -> &mut V {
        &mut self.value
    }
}

impl<R: RawMutex, V: fmt::Debug> fmt::Debug for CellWriteGuard<'_, R, V> {
    #[cfg_attr(test, mutants::skip)] // No API contract to test.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.value, f)
    }
}
