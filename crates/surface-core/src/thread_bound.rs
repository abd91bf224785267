// File: crates/surface-core/src/thread_bound.rs
// Summary: Wrapper that lets a thread-affine value sit in shared tables while only its owner thread touches it.

use std::fmt;
use std::mem::ManuallyDrop;
use std::thread::{self, ThreadId};

/// Holds a value that must only be used, and dropped, on the thread that created it.
///
/// Other threads may hold and move the wrapper but can never reach the value.
/// Dropping the wrapper on a foreign thread leaks the value instead of running
/// its destructor there.
pub struct ThreadBound<T> {
    value: ManuallyDrop<T>,
    owner: ThreadId,
}

// SAFETY: the value is only reachable (and only dropped) on `owner`; every
// accessor checks the calling thread first.
unsafe impl<T> Send for ThreadBound<T> {}
unsafe impl<T> Sync for ThreadBound<T> {}

impl<T> ThreadBound<T> {
    /// Binds `value` to the calling thread.
    pub fn new(value: T) -> Self {
        Self { value: ManuallyDrop::new(value), owner: thread::current().id() }
    }

    pub fn owner(&self) -> ThreadId { self.owner }

    pub fn is_owner(&self) -> bool { thread::current().id() == self.owner }

    /// The value, if called on the owner thread.
    pub fn get(&self) -> Option<&T> {
        if self.is_owner() { Some(&self.value) } else { None }
    }
}

impl<T> Drop for ThreadBound<T> {
    fn drop(&mut self) {
        if self.is_owner() {
            // SAFETY: dropped exactly once, on the owner thread.
            unsafe { ManuallyDrop::drop(&mut self.value) }
        } else {
            log::warn!(
                "thread-bound value owned by {:?} dropped on {:?}; leaking it",
                self.owner,
                thread::current().id()
            );
        }
    }
}

impl<T> fmt::Debug for ThreadBound<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThreadBound").field("owner", &self.owner).finish_non_exhaustive()
    }
}
