use std::ops::Deref;

use parking_lot::{RwLock, RwLockReadGuard};

/// Shared (read) access to a [`RwLock`], released when dropped.
///
/// The guard can either acquire the shared lock itself ([`new()`][Self::new]) or take over a
/// shared lock that was already acquired by other means ([`adopt()`][Self::adopt]), for example
/// through a successful `try_lock_shared()` on the raw lock.
#[derive(derive_more::Debug)]
pub struct SharedLockGuard<'a, V> {
    inner: RwLockReadGuard<'a, V>,
}

impl<'a, V> SharedLockGuard<'a, V> {
    /// Acquires shared access, blocking until it is available.
    #[must_use]
    pub fn new(lock: &'a RwLock<V>) -> Self {
        Self { inner: lock.read() }
    }

    /// Takes over a shared lock that the current thread already holds.
    ///
    /// # Safety
    ///
    /// The caller must hold one shared lock on `lock` that is not released by anything else. The
    /// guard releases it when dropped.
    #[must_use]
    pub unsafe fn adopt(lock: &'a RwLock<V>) -> Self {
        Self {
            // SAFETY: Forwarding the caller's guarantee.
            inner: unsafe { lock.make_read_guard_unchecked() },
        }
    }

    pub(crate) fn try_new(lock: &'a RwLock<V>) -> Option<Self> {
        lock.try_read().map(|inner| Self { inner })
    }
}

impl<V> Deref for SharedLockGuard<'_, V> {
    type Target = V;

    fn deref(&self) -> &V {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::lock_api::RawRwLock as _;
    use static_assertions::assert_not_impl_any;

    use super::*;

    assert_not_impl_any!(SharedLockGuard<'static, u32>: Send);

    #[test]
    fn new_holds_shared_lock_until_drop() {
        let lock = RwLock::new(4_u32);

        let guard = SharedLockGuard::new(&lock);
        assert_eq!(*guard, 4);
        assert!(lock.is_locked());
        assert!(lock.try_write().is_none());
        assert!(SharedLockGuard::try_new(&lock).is_some());

        drop(guard);
        assert!(!lock.is_locked());
    }

    #[test]
    fn adopt_releases_existing_lock() {
        let lock = RwLock::new(9_u32);

        // SAFETY: The raw lock is only used to take the shared lock adopted below.
        let raw = unsafe { lock.raw() };
        raw.lock_shared();

        // SAFETY: We hold the shared lock taken above and hand it over.
        let guard = unsafe { SharedLockGuard::adopt(&lock) };
        assert_eq!(*guard, 9);
        assert!(lock.try_write().is_none());

        drop(guard);
        assert!(!lock.is_locked());
        assert!(lock.try_write().is_some());
    }
}
