//! Reusable float-buffer pool with scoped acquisition
//!
//! One pool is owned per tool session and passed by reference into each
//! engine instance; handles return their allocation on drop. This replaces
//! ad-hoc per-reinit allocation: an interactive session constructs and tears
//! down engines repeatedly at mouse-event rate.

use std::cell::RefCell;
use std::ops::{Deref, DerefMut};

/// Pool of interchangeable `f32` buffers
///
/// Single-threaded by contract, like the engine itself; interior mutability
/// lets several engine instances share one pool within a session.
#[derive(Debug, Default)]
pub struct BufferPool {
    idle: RefCell<Vec<Vec<f32>>>,
}

impl BufferPool {
    /// Create an empty pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire a zeroed buffer of exactly `len` elements
    ///
    /// Reuses an idle allocation when one exists, growing or shrinking it to
    /// the requested length.
    pub fn acquire(&self, len: usize) -> PoolHandle<'_> {
        let mut buffer = self.idle.borrow_mut().pop().unwrap_or_default();
        buffer.clear();
        buffer.resize(len, 0.0);
        PoolHandle { pool: self, buffer }
    }

    /// Acquire a buffer initialized from `values`
    pub fn acquire_from(&self, values: &[f32]) -> PoolHandle<'_> {
        let mut handle = self.acquire(values.len());
        handle.buffer.copy_from_slice(values);
        handle
    }

    /// Number of buffers currently idle in the pool
    pub fn idle_buffers(&self) -> usize {
        self.idle.borrow().len()
    }

    fn release(&self, buffer: Vec<f32>) {
        self.idle.borrow_mut().push(buffer);
    }
}

/// Scoped handle to a pooled buffer; releases the allocation on drop
#[derive(Debug)]
pub struct PoolHandle<'p> {
    pool: &'p BufferPool,
    buffer: Vec<f32>,
}

impl PoolHandle<'_> {
    /// Overwrite the buffer contents from a slice of the same length
    ///
    /// Mismatched lengths leave the buffer untouched; callers supply fields
    /// sized to the grid area by contract.
    pub fn copy_from(&mut self, values: &[f32]) {
        if values.len() == self.buffer.len() {
            self.buffer.copy_from_slice(values);
        } else {
            debug_assert_eq!(values.len(), self.buffer.len());
        }
    }
}

impl Deref for PoolHandle<'_> {
    type Target = [f32];

    fn deref(&self) -> &Self::Target {
        &self.buffer
    }
}

impl DerefMut for PoolHandle<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.buffer
    }
}

impl Drop for PoolHandle<'_> {
    fn drop(&mut self) {
        self.pool.release(std::mem::take(&mut self.buffer));
    }
}
