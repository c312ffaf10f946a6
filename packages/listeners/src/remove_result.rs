/// Outcome of removing a listener from a collection.
///
/// Besides success and failure, the result tells whether the collection just became empty, which
/// callers use to stop work once the last listener leaves.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[expect(
    clippy::exhaustive_enums,
    reason = "the set of outcomes of removing an element is complete"
)]
pub enum RemoveResult {
    /// The listener was empty, or it was not in the collection. Nothing was removed.
    NullInput,

    /// The listener was removed and the collection is now empty.
    OkLast,

    /// The listener was removed and others remain in the collection.
    Ok,
}

impl RemoveResult {
    /// Whether a listener was removed.
    #[must_use]
    pub fn is_ok(self) -> bool {
        matches!(self, Self::OkLast | Self::Ok)
    }
}
