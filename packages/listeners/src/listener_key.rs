use std::fmt;
use std::num::NonZeroU64;

/// Identifies a listener added to a [`BoxedListeners`][crate::BoxedListeners] collection.
///
/// Keys are issued by the collection when a listener is added and are needed to remove it again.
/// A collection never issues the same key twice, so a stale key cannot accidentally remove a
/// listener that was added later.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ListenerKey(NonZeroU64);

impl ListenerKey {
    pub(crate) const fn new(value: NonZeroU64) -> Self {
        Self(value)
    }

    /// The numeric value of the key. Never zero.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for ListenerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
