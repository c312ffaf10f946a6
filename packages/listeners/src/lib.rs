#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Storage and dispatch primitives for listeners: callback targets that a component notifies
//! when something happens.
//!
//! A listener is referenced through a [`Handle`]: a plain reference, an `Arc`/`Rc` or a weak
//! reference. The package offers:
//!
//! * [`Listener<H>`] - a slot for at most one listener, replaced by the last writer.
//! * [`SharedListener<T>`] - a lock-free slot for one `Arc` listener.
//! * [`Listeners<H>`] - an ordered, duplicate-free collection of listener handles.
//! * [`BoxedListeners<T>`] - an ordered collection that owns its listeners and identifies them
//!   by [`ListenerKey`].
//!
//! Every holder is guarded by a [`LockPolicy`]. The default, [`Recursive`], lets a listener call
//! back into the holder that is dispatching to it from the same thread. [`Exclusive`] and
//! [`SharedExclusive`] use non-reentrant primitives and [`Unsynchronized`] does no locking at all,
//! for holders confined to one thread.
//!
//! No lock is ever held while a listener runs. A listener may add or remove listeners (itself
//! included) from its callback; when that happens on the dispatching thread, every listener
//! present for the whole dispatch is called exactly once. Changes made by other threads during a
//! dispatch carry no such guarantee and may cause a listener to be missed.
//!
//! The same locking is available for arbitrary values through [`Guarded<V, P>`], and the
//! [`invoke`] module exposes the dispatch logic for custom containers.
//!
//! Two small collaborators round out the package: the [`Logger`]/[`Loggable`] logging facade
//! (with [`TracingLogger`] forwarding into `tracing`) and the [`Blob`] byte view.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicU32, Ordering};
//!
//! use listeners::{AddResult, Listeners, RemoveResult};
//!
//! let first = Arc::new(AtomicU32::new(0));
//! let second = Arc::new(AtomicU32::new(0));
//!
//! let listeners = Listeners::<Arc<AtomicU32>>::new();
//! assert_eq!(listeners.add(Arc::clone(&first)), AddResult::OkFirst);
//! assert_eq!(listeners.add(Arc::clone(&second)), AddResult::Ok);
//! assert_eq!(listeners.add(Arc::clone(&first)), AddResult::Duplicate);
//!
//! listeners.invoke(|counter| {
//!     counter.fetch_add(1, Ordering::Relaxed);
//! });
//!
//! assert_eq!(listeners.remove(&first), RemoveResult::Ok);
//! assert_eq!(listeners.remove(&second), RemoveResult::OkLast);
//!
//! assert_eq!(first.load(Ordering::Relaxed), 1);
//! assert_eq!(second.load(Ordering::Relaxed), 1);
//! ```

mod add_result;
mod blob;
mod boxed_listeners;
mod constants;
mod guarded;
mod handle;
pub mod invoke;
mod listener;
mod listener_key;
mod listeners;
mod lock;
mod logging;
mod remove_result;
mod shared_listener;

#[cfg(test)]
mod test_utils;

pub use add_result::*;
pub use blob::*;
pub use boxed_listeners::*;
pub(crate) use constants::*;
pub use guarded::*;
pub use handle::*;
pub use listener::*;
pub use listener_key::*;
pub use listeners::*;
pub use lock::*;
pub use logging::*;
pub use remove_result::*;
pub use shared_listener::*;
