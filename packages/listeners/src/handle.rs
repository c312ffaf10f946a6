use std::ptr;
use std::rc::{self, Rc};
use std::sync::{self, Arc};

/// A way of referring to a listener that can be stored in a
/// [`Listener`][crate::Listener] or [`Listeners`][crate::Listeners].
///
/// Three kinds of representation are supported out of the box:
///
/// | Kind | Types | Empty when |
/// |------|-------|------------|
/// | plain | `Option<&T>`, `&T` | `None` |
/// | shared | `Option<Arc<T>>`, `Option<Rc<T>>`, `Arc<T>`, `Rc<T>` | `None` |
/// | weak | `sync::Weak<T>`, `rc::Weak<T>` | the target has been dropped |
///
/// Identity ([`same()`][Self::same]) is address identity of the target for all of them, so two
/// handles are "the same listener" when they point at the same object. `T` may be unsized, which
/// means trait objects work as listeners without any wrapper.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use listeners::Handle;
///
/// let target = Arc::new(5_u32);
/// let weak = Arc::downgrade(&target);
///
/// assert!(!weak.is_vacant());
/// assert_eq!(weak.with_target(|value| value + 1), Some(6));
///
/// drop(target);
///
/// assert!(weak.is_vacant());
/// assert_eq!(weak.with_target(|value| value + 1), None);
/// ```
pub trait Handle: Clone {
    /// The listener that the handle refers to.
    type Target: ?Sized;

    /// The form in which the listener is passed to functors that need more than a borrow.
    ///
    /// For weak handles this is the upgraded strong reference.
    type Strong;

    /// Whether the handle currently refers to nothing.
    ///
    /// For weak handles this is true once the target has been dropped.
    fn is_vacant(&self) -> bool;

    /// Obtains the strong form of the handle, if it is not empty.
    fn to_strong(&self) -> Option<Self::Strong>;

    /// Calls `f` with the target, if there is one.
    ///
    /// Weak handles are upgraded for the duration of the call only.
    fn with_target<R>(&self, f: impl FnOnce(&Self::Target) -> R) -> Option<R>;

    /// Whether both handles refer to the same listener.
    ///
    /// Two empty plain or shared handles are the same. Weak handles compare by the allocation
    /// they point at, even after it has been dropped.
    fn same(&self, other: &Self) -> bool;
}

impl<'a, T: ?Sized> Handle for Option<&'a T> {
    type Target = T;
    type Strong = &'a T;

    fn is_vacant(&self) -> bool {
        self.is_none()
    }

    fn to_strong(&self) -> Option<Self::Strong> {
        *self
    }

    fn with_target<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.map(f)
    }

    fn same(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => ptr::addr_eq(*a, *b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<'a, T: ?Sized> Handle for &'a T {
    type Target = T;
    type Strong = &'a T;

    fn is_vacant(&self) -> bool {
        false
    }

    fn to_strong(&self) -> Option<Self::Strong> {
        Some(*self)
    }

    fn with_target<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        Some(f(self))
    }

    fn same(&self, other: &Self) -> bool {
        ptr::addr_eq(*self, *other)
    }
}

impl<T: ?Sized> Handle for Option<Arc<T>> {
    type Target = T;
    type Strong = Arc<T>;

    fn is_vacant(&self) -> bool {
        self.is_none()
    }

    fn to_strong(&self) -> Option<Self::Strong> {
        self.as_ref().map(Arc::clone)
    }

    fn with_target<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.as_deref().map(f)
    }

    fn same(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T: ?Sized> Handle for Arc<T> {
    type Target = T;
    type Strong = Self;

    fn is_vacant(&self) -> bool {
        false
    }

    fn to_strong(&self) -> Option<Self::Strong> {
        Some(Self::clone(self))
    }

    fn with_target<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        Some(f(self))
    }

    fn same(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other)
    }
}

impl<T: ?Sized> Handle for Option<Rc<T>> {
    type Target = T;
    type Strong = Rc<T>;

    fn is_vacant(&self) -> bool {
        self.is_none()
    }

    fn to_strong(&self) -> Option<Self::Strong> {
        self.as_ref().map(Rc::clone)
    }

    fn with_target<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.as_deref().map(f)
    }

    fn same(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T: ?Sized> Handle for Rc<T> {
    type Target = T;
    type Strong = Self;

    fn is_vacant(&self) -> bool {
        false
    }

    fn to_strong(&self) -> Option<Self::Strong> {
        Some(Self::clone(self))
    }

    fn with_target<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        Some(f(self))
    }

    fn same(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other)
    }
}

impl<T: ?Sized> Handle for sync::Weak<T> {
    type Target = T;
    type Strong = Arc<T>;

    fn is_vacant(&self) -> bool {
        self.strong_count() == 0
    }

    fn to_strong(&self) -> Option<Self::Strong> {
        Self::upgrade(self)
    }

    fn with_target<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        let strong = Self::upgrade(self)?;
        Some(f(&strong))
    }

    fn same(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other)
    }
}

impl<T: ?Sized> Handle for rc::Weak<T> {
    type Target = T;
    type Strong = Rc<T>;

    fn is_vacant(&self) -> bool {
        self.strong_count() == 0
    }

    fn to_strong(&self) -> Option<Self::Strong> {
        Self::upgrade(self)
    }

    fn with_target<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        let strong = Self::upgrade(self)?;
        Some(f(&strong))
    }

    fn same(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other)
    }
}
