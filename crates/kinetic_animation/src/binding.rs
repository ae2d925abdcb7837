//! Bindings to externally owned values
//!
//! A [`PropertyAnimation`](crate::PropertyAnimation) never owns the value it
//! drives. It writes through a binding for as long as it lives, and the
//! caller guarantees no other writer touches the value while it is active.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::{Arc, Mutex, PoisonError};

/// Read/write access to a value owned elsewhere
pub trait Binding<T> {
    /// Snapshot of the current value
    fn read(&self) -> T;

    fn write(&mut self, value: T);
}

/// Exclusive borrow: the borrow checker enforces the single-writer contract
impl<T: Clone> Binding<T> for &mut T {
    fn read(&self) -> T {
        (**self).clone()
    }

    fn write(&mut self, value: T) {
        **self = value;
    }
}

/// Shared single-threaded handle, for trees that bind one value from several leaves
impl<T: Clone> Binding<T> for Rc<RefCell<T>> {
    fn read(&self) -> T {
        self.borrow().clone()
    }

    fn write(&mut self, value: T) {
        *self.borrow_mut() = value;
    }
}

impl<T: Copy> Binding<T> for Rc<Cell<T>> {
    fn read(&self) -> T {
        self.get()
    }

    fn write(&mut self, value: T) {
        self.set(value);
    }
}

/// Shared handle readable from another thread (e.g. a render thread)
impl<T: Clone> Binding<T> for Arc<Mutex<T>> {
    fn read(&self) -> T {
        self.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn write(&mut self, value: T) {
        *self.lock().unwrap_or_else(PoisonError::into_inner) = value;
    }
}
