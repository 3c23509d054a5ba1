// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Handle pool

use crate::ItemId;

/// A handle which may be bound to a row and recycled
pub trait Recycle {
    /// Bind to row `id`
    fn assign(&mut self, id: ItemId);

    /// Clear any reference to the previously bound row
    ///
    /// Called before the handle enters a [`Pool`].
    fn recycle(&mut self);
}

/// A free-list of recycled handles
///
/// The pool is not bounded explicitly: it never holds more handles than were
/// once simultaneously visible.
#[derive(Debug)]
pub struct Pool<T> {
    free: Vec<T>,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Pool { free: Vec::new() }
    }
}

impl<T: Recycle> Pool<T> {
    /// Take a recycled handle, if any
    ///
    /// `None` is not an error: the caller should construct a new handle.
    #[inline]
    pub fn acquire(&mut self) -> Option<T> {
        self.free.pop()
    }

    /// Return a handle to the pool
    pub fn release(&mut self, mut handle: T) {
        handle.recycle();
        self.free.push(handle);
    }

    /// The number of pooled handles
    #[inline]
    pub fn len(&self) -> usize {
        self.free.len()
    }

    /// True if no handles are pooled
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }
}
