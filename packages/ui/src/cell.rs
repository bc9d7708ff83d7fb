//! Shared view state handles.
//!
//! Controllers are written against [`ViewCell`] instead of Dioxus signals so the
//! same code drives the app (through [`Signal`]) and headless tests (through
//! `Rc<RefCell<_>>`).

use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;

/// Mutable state that survives across await points of a controller.
pub trait ViewCell<T> {
    /// Mutate the state. The borrow ends before `update` returns.
    fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R;
}

impl<T: 'static> ViewCell<T> for Signal<T> {
    fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut signal = *self;
        let mut guard = signal.write();
        f(&mut *guard)
    }
}

impl<T> ViewCell<T> for Rc<RefCell<T>> {
    fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.borrow_mut())
    }
}
