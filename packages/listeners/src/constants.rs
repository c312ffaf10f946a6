// A value guarded by a reentrant or no-op primitive is tracked by a borrow flag. Hitting this
// means the same thread asked for write access while it was still reading (or the reverse),
// which is a bug in the calling code, not a recoverable condition.
pub(crate) const ERR_ALREADY_BORROWED: &str = "guarded value is already borrowed by the current \
    thread - a write guard cannot coexist with any other guard on the same value";

pub(crate) const ERR_KEY_SPACE_EXHAUSTED: &str = "listener key space exhausted - more than \
    u64::MAX listeners were added to one collection";

pub(crate) const ERR_NOOP_RELOCKED: &str = "no-op mutex is already locked - an unsynchronized \
    lock was acquired twice without going through a reentrant wrapper";
