//! Generic dispatch through listener handles.
//!
//! The functions in this module are the single place that knows how to check a [`Handle`] for
//! emptiness and how to call through it. Both the single-slot [`Listener`][crate::Listener] and
//! the collections are built on top of them.
//!
//! # Reentrancy-safe traversal
//!
//! [`invoke_many()`] and [`apply_each()`] walk a [`Sequence`] by index. Each step reads one
//! element (a cloned handle) and calls it with nothing borrowed from the sequence. The traversal
//! remembers every handle it has called and, at each step, moves on to the first element that
//! is not one of them:
//!
//! * If the element just called is still at its index, nothing before it moved and the search
//!   continues right after it.
//! * Otherwise elements were removed during the call and the search starts over from the front,
//!   skipping the handles already called.
//!
//! The traversal ends when no element is left that has not been called. A listener may
//! therefore add or remove listeners (itself included) from within its own callback on the
//! dispatching thread: every listener present for the whole traversal is called exactly once,
//! listeners added during it are called once and no listener is called twice. The called
//! handles are kept until the traversal ends.
//!
//! Changes made by other threads while a traversal runs are only seen at step boundaries. Such
//! a change can make the traversal miss an element that was present throughout, because the
//! check after a call cannot tell which thread moved it.

use crate::Handle;

/// An ordered sequence of handles that can be traversed by index while it is being mutated.
///
/// Implementations return clones of the handles so that the caller does not hold any borrow of
/// (or lock on) the sequence while calling a listener.
pub trait Sequence<H> {
    /// A copy of the element at `index`, or `None` if the index is out of range.
    fn get(&self, index: usize) -> Option<H>;
}

impl<H: Clone> Sequence<H> for [H] {
    fn get(&self, index: usize) -> Option<H> {
        <[H]>::get(self, index).cloned()
    }
}

/// Whether `handle` refers to nothing (or, for weak handles, to a dropped target).
#[must_use]
pub fn is_empty<H: Handle>(handle: &H) -> bool {
    handle.is_vacant()
}

/// Calls `operation` on the target of `handle` and returns its result.
///
/// An empty or expired handle is not an error: the operation is skipped and `R::default()` is
/// returned.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use listeners::invoke;
///
/// let target = Arc::new(String::from("hello"));
/// let weak = Arc::downgrade(&target);
///
/// assert_eq!(invoke::invoke_one(&weak, String::len), 5);
///
/// drop(target);
///
/// assert_eq!(invoke::invoke_one(&weak, String::len), 0);
/// ```
pub fn invoke_one<H, R>(handle: &H, operation: impl FnOnce(&H::Target) -> R) -> R
where
    H: Handle,
    R: Default,
{
    handle.with_target(operation).unwrap_or_default()
}

/// Calls `operation` on the target of every non-empty handle in `sequence`, in order.
///
/// Elements may be added to or removed from the sequence while this is running, including by
/// `operation` itself. See the [module documentation][self] for the traversal rules.
pub fn invoke_many<S, H>(sequence: &S, mut operation: impl FnMut(&H::Target))
where
    S: Sequence<H> + ?Sized,
    H: Handle,
{
    traverse(sequence, |handle| {
        handle.with_target(&mut operation);
    });
}

/// Passes the strong form of every non-empty handle in `sequence` to `functor`, in order.
///
/// Weak handles are upgraded for the duration of the call. Empty and expired handles are skipped.
/// The traversal rules are the same as for [`invoke_many()`].
pub fn apply_each<S, H>(sequence: &S, mut functor: impl FnMut(H::Strong))
where
    S: Sequence<H> + ?Sized,
    H: Handle,
{
    traverse(sequence, |handle| {
        if let Some(strong) = handle.to_strong() {
            functor(strong);
        }
    });
}

#[expect(
    clippy::arithmetic_side_effects,
    reason = "the index stays below the length of an in-memory sequence, so it cannot overflow"
)]
fn traverse<S, H>(sequence: &S, mut visit: impl FnMut(&H))
where
    S: Sequence<H> + ?Sized,
    H: Handle,
{
    let mut visited: Vec<H> = Vec::new();
    let mut from = 0_usize;

    while let Some((index, current)) = next_unvisited(sequence, from, &visited) {
        visit(&current);

        let in_place = sequence
            .get(index)
            .is_some_and(|after| after.same(&current));

        // Everything before `from` has been visited.
        from = if in_place { index + 1 } else { 0 };

        visited.push(current);
    }
}

fn next_unvisited<S, H>(sequence: &S, from: usize, visited: &[H]) -> Option<(usize, H)>
where
    S: Sequence<H> + ?Sized,
    H: Handle,
{
    (from..)
        .map_while(|index| sequence.get(index).map(|handle| (index, handle)))
        .find(|(_, candidate)| !visited.iter().any(|seen| seen.same(candidate)))
}
