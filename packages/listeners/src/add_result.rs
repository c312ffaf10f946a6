/// Outcome of adding a listener to a collection.
///
/// Besides success and failure, the result tells whether the collection just went from empty to
/// non-empty, which callers use to start work only once the first listener arrives.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[expect(
    clippy::exhaustive_enums,
    reason = "the set of outcomes of adding an element is complete"
)]
pub enum AddResult {
    /// The listener was empty (or expired) and was not added.
    NullInput,

    /// The listener is already in the collection.
    Duplicate,

    /// The listener was added and is the only one in the collection.
    OkFirst,

    /// The listener was added next to others already in the collection.
    Ok,
}

impl AddResult {
    /// Whether the listener was added.
    #[must_use]
    pub fn is_ok(self) -> bool {
        matches!(self, Self::OkFirst | Self::Ok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_ok() {
        assert!(!AddResult::NullInput.is_ok());
        assert!(!AddResult::Duplicate.is_ok());
        assert!(AddResult::OkFirst.is_ok());
        assert!(AddResult::Ok.is_ok());
    }
}
