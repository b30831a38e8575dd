use std::io;

use thiserror::Error;

use crate::pool::MIN_CAPACITY;

/// Error produced by a user-supplied allocator or deallocator callback.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Construction-time failure. Fatal: no pool is produced.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The requested capacity is below the supported lower bound.
    #[error("a pool must have a capacity of at least {min}, got {0}", min = MIN_CAPACITY)]
    CapacityTooSmall(usize),
    /// The replenishment target cannot exceed the store's capacity.
    #[error("minimum fill target {minimum} exceeds capacity {capacity}")]
    MinimumExceedsCapacity { minimum: usize, capacity: usize },
    /// Every pool needs an allocator to mint resources with.
    #[error("a pool cannot be built without an allocator")]
    MissingAllocator,
    /// The maintainer thread could not be started.
    #[error("failed to start pool maintainer thread: {0}")]
    Spawn(#[from] io::Error),
}

/// Operational failure.
///
/// Allocation errors surface both on [`fetch`](crate::Pool::fetch) and
/// through the configured [`Observer`](crate::Observer); deallocation errors
/// go through the observer only and never interrupt a caller.
#[derive(Debug, Error)]
pub enum Error {
    /// The allocator callback failed to produce a resource.
    #[error("allocator failed: {0}")]
    Allocation(CallbackError),
    /// The deallocator callback failed while disposing of a resource.
    #[error("deallocator failed: {0}")]
    Deallocation(CallbackError),
    /// The pool has been shut down with [`close`](crate::Pool::close).
    #[error("pool is closed")]
    Closed,
}
