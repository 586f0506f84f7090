//! Switches between `std` and `loom` primitives.
//!
//! Build with `RUSTFLAGS="--cfg loom"` to run the model tests.

#[cfg(loom)]
pub(crate) use loom::{cell::UnsafeCell, sync::Arc, thread};

#[cfg(not(loom))]
pub(crate) use std::{sync::Arc, thread};

/// `std` counterpart of `loom::cell::UnsafeCell`, exposing the same closure based API.
#[cfg(not(loom))]
#[derive(Debug)]
pub(crate) struct UnsafeCell<T>(std::cell::UnsafeCell<T>);

#[cfg(not(loom))]
impl<T> UnsafeCell<T> {
    pub(crate) const fn new(data: T) -> Self {
        Self(std::cell::UnsafeCell::new(data))
    }

    #[inline(always)]
    pub(crate) fn with<R>(&self, f: impl FnOnce(*const T) -> R) -> R {
        f(self.0.get())
    }

    #[inline(always)]
    pub(crate) fn with_mut<R>(&self, f: impl FnOnce(*mut T) -> R) -> R {
        f(self.0.get())
    }
}
