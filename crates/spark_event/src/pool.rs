//! Fixed-capacity object pool with scoped handles.
//!
//! All containers are allocated up front. [`Pool::acquire`] takes one from
//! the front of the free list and wraps it in a [`Pooled`] handle; dropping
//! the handle (or calling [`Pooled::release`]) puts it back at the end of
//! the list. Released containers keep whatever the last user wrote into
//! them, so callers must overwrite every field they rely on.
//!
//! # Thread Safety
//!
//! The pool is single-threaded: the free list lives in a [`RefCell`] and the
//! pool is `!Sync`.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::ops::{Deref, DerefMut};

use tracing::warn;

use crate::error::PoolError;
use crate::event::Event;

/// The pool used for event containers.
pub type EventPool = Pool<Event>;

/// A handle to a pooled event container.
pub type PooledEvent<'a> = Pooled<'a, Event>;

/// A FIFO pool of preallocated `T` values.
#[derive(Debug)]
pub struct Pool<T: Default> {
    free: RefCell<VecDeque<T>>,
    capacity: usize,
}

impl<T: Default> Pool<T> {
    /// Creates a pool holding `capacity` default-constructed values.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self::from_fn(capacity, T::default)
    }

    /// Creates a pool holding `capacity` values produced by `f`.
    #[must_use]
    pub fn from_fn(capacity: usize, mut f: impl FnMut() -> T) -> Self {
        let free: VecDeque<T> = (0..capacity).map(|_| f()).collect();
        Self {
            free: RefCell::new(free),
            capacity,
        }
    }

    /// Takes a container from the front of the free list.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Exhausted`] if every container is in flight.
    pub fn acquire(&self) -> Result<Pooled<'_, T>, PoolError> {
        let Some(value) = self.free.borrow_mut().pop_front() else {
            warn!(capacity = self.capacity, "pool exhausted");
            return Err(PoolError::Exhausted {
                capacity: self.capacity,
            });
        };
        Ok(Pooled { pool: self, value })
    }

    /// Total number of containers owned by the pool.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of containers ready to be acquired.
    #[must_use]
    pub fn available(&self) -> usize {
        self.free.borrow().len()
    }

    /// Number of containers currently handed out.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.capacity - self.available()
    }

    fn give_back(&self, value: T) {
        self.free.borrow_mut().push_back(value);
    }
}

/// Exclusive, temporary access to one pooled container.
///
/// The container goes back to its pool when the handle is dropped, on every
/// exit path.
#[derive(Debug)]
pub struct Pooled<'a, T: Default> {
    pool: &'a Pool<T>,
    value: T,
}

impl<T: Default> Pooled<'_, T> {
    /// Returns the container to the pool now instead of at end of scope.
    pub fn release(self) {
        drop(self);
    }
}

impl<T: Default> Deref for Pooled<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T: Default> DerefMut for Pooled<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.value
    }
}

impl<T: Default> Drop for Pooled<'_, T> {
    fn drop(&mut self) {
        self.pool.give_back(std::mem::take(&mut self.value));
    }
}
