use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

/// A listener that remembers how often and with what it was notified.
#[derive(Debug, Default)]
pub(crate) struct Recorder {
    calls: AtomicUsize,
    last: AtomicU32,
}

impl Recorder {
    pub(crate) fn notify(&self, value: u32) {
        self.last.store(value, Ordering::Relaxed);
        self.calls.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    pub(crate) fn last(&self) -> Option<u32> {
        (self.calls() > 0).then(|| self.last.load(Ordering::Relaxed))
    }
}
