use std::fmt;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering::*;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};

use crossbeam_queue::ArrayQueue;

use crate::clock::{Clock, SystemClock};
use crate::error::{CallbackError, ConfigError, Error};
use crate::maintainer;
use crate::observer::{Observer, TracingObserver};

/// Smallest capacity a pool can be built with.
pub const MIN_CAPACITY: usize = 10;

/// Function producing a fresh resource.
pub type Allocator<T> = Arc<dyn Fn() -> Result<T, CallbackError> + Send + Sync>;

/// Function disposing of a resource the pool cannot retain.
pub type Deallocator<T> = Arc<dyn Fn(T) -> Result<(), CallbackError> + Send + Sync>;

/// State shared between the pool handle, the maintainer thread and
/// overflow-disposal threads.
pub(crate) struct Shared<T> {
    /// Bounded store of ready resources.
    pub(crate) store: ArrayQueue<T>,
    /// Fill level the maintainer keeps the store at.
    pub(crate) minimum: usize,
    pub(crate) allocator: Allocator<T>,
    pub(crate) deallocator: Deallocator<T>,
    pub(crate) observer: Arc<dyn Observer>,
    pub(crate) clock: Arc<dyn Clock>,
    /// One-shot stop signal for the maintainer, doubling as the closed flag.
    pub(crate) shutdown: AtomicBool,
}

impl<T> Shared<T> {
    /// Run the deallocator on a resource the store will not take back.
    pub(crate) fn dispose(&self, resource: T) {
        if let Err(source) = (self.deallocator)(resource) {
            self.observer.error(&Error::Deallocation(source));
        }
    }
}

/// A concurrent, self-replenishing resource pool.
///
/// Resources are created and destroyed exclusively through the configured
/// callbacks; the pool never inspects them. A background maintainer thread
/// keeps at least [`minimum`](Pool::minimum) resources ready at all times,
/// and none of the public operations ever block the caller.
///
/// # Examples
///
/// ```rust
/// use wellspring::Builder;
///
/// let pool = Builder::new(20)
///     .minimum(2)
///     .allocator(|| Ok(String::with_capacity(1024)))
///     .build()
///     .unwrap();
///
/// assert_eq!(pool.available(), 2);
/// let buffer = pool.fetch().unwrap();
/// assert!(buffer.capacity() >= 1024);
/// pool.release(buffer);
/// ```
pub struct Pool<T: Send + 'static> {
    shared: Arc<Shared<T>>,
    capacity: usize,
    /// Taken, and joined, exactly once on close.
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl<T: Send + 'static> fmt::Debug for Pool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("capacity", &self.capacity)
            .field("minimum", &self.shared.minimum)
            .field("available", &self.shared.store.len())
            .finish_non_exhaustive()
    }
}

impl<T: Send + 'static> Pool<T> {
    /// Create a new pool from the given configuration.
    ///
    /// Validation happens before any side effect. On success the store has
    /// been pre-filled up to `minimum` and the maintainer is running. A
    /// pre-fill allocation failure is reported to the observer and skipped,
    /// never aborting construction; the maintainer retries it.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use wellspring::{Config, Pool};
    ///
    /// let mut config = Config::new(10);
    /// config.allocator = Some(Arc::new(|| Ok(0u32)));
    /// let pool = Pool::with_config(config).unwrap();
    /// assert_eq!(pool.capacity(), 10);
    /// assert_eq!(pool.minimum(), 1);
    /// ```
    pub fn with_config(config: Config<T>) -> Result<Self, ConfigError> {
        let Config {
            capacity,
            minimum,
            allocator,
            deallocator,
            observer,
            clock,
        } = config;
        if capacity < MIN_CAPACITY {
            return Err(ConfigError::CapacityTooSmall(capacity));
        }
        let minimum = match minimum {
            Some(minimum) if minimum > capacity => {
                return Err(ConfigError::MinimumExceedsCapacity { minimum, capacity });
            }
            Some(minimum) => minimum,
            None => capacity / 10,
        };
        let Some(allocator) = allocator else {
            return Err(ConfigError::MissingAllocator);
        };

        let shared = Arc::new(Shared {
            store: ArrayQueue::new(capacity),
            minimum,
            allocator,
            deallocator,
            observer,
            clock,
            shutdown: AtomicBool::new(false),
        });

        // Pre-fill up to the replenishment target.
        for _ in 0..minimum {
            match (shared.allocator)() {
                Ok(resource) => {
                    shared.observer.message("resource allocated");
                    let _ = shared.store.push(resource);
                }
                Err(source) => shared.observer.error(&Error::Allocation(source)),
            }
        }

        let handle = thread::Builder::new()
            .name("wellspring-maintainer".into())
            .spawn({
                let shared = Arc::clone(&shared);
                move || maintainer::run(shared)
            })?;

        Ok(Self {
            shared,
            capacity,
            handle: Mutex::new(Some(handle)),
        })
    }

    /// Fetch a resource from the pool.
    ///
    /// Non-blocking: pops a ready resource if one is available, otherwise
    /// mints a fresh one on the caller's own path. Ownership transfers to the
    /// caller; hand the resource back with [`release`](Pool::release).
    ///
    /// # Errors
    ///
    /// [`Error::Allocation`] if the store was empty and the allocator failed
    /// (also reported to the observer), [`Error::Closed`] after
    /// [`close`](Pool::close).
    ///
    /// # Example
    ///
    /// ```rust
    /// use wellspring::Builder;
    ///
    /// let pool = Builder::new(10)
    ///     .minimum(0)
    ///     .allocator(|| Ok(0u32))
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(pool.available(), 0);
    /// // Empty store: this fetch allocates on the spot.
    /// let resource = pool.fetch().unwrap();
    /// pool.release(resource);
    /// assert_eq!(pool.available(), 1);
    /// ```
    pub fn fetch(&self) -> Result<T, Error> {
        if self.shared.shutdown.load(Acquire) {
            return Err(Error::Closed);
        }
        if let Some(resource) = self.shared.store.pop() {
            return Ok(resource);
        }
        match (self.shared.allocator)() {
            Ok(resource) => Ok(resource),
            Err(source) => {
                let error = Error::Allocation(source);
                self.shared.observer.error(&error);
                Err(error)
            }
        }
    }

    /// Return a resource to the pool.
    ///
    /// Non-blocking: if the store is at capacity the resource is handed to
    /// the deallocator on a separate thread instead, so the caller is never
    /// held up by cleanup. Deallocator failures are reported to the observer.
    pub fn release(&self, resource: T) {
        if self.shared.shutdown.load(Acquire) {
            self.dispose_detached(resource);
            return;
        }
        if let Err(resource) = self.shared.store.push(resource) {
            self.dispose_detached(resource);
        }
    }

    fn dispose_detached(&self, resource: T) {
        let shared = Arc::clone(&self.shared);
        thread::spawn(move || shared.dispose(resource));
    }

    /// Number of resources currently resident in the store.
    ///
    /// A point-in-time snapshot: under concurrent fetch/release/maintainer
    /// activity it is immediately stale, so treat it as an observability
    /// signal, not something to base decisions on.
    ///
    /// # Example
    ///
    /// ```rust
    /// use wellspring::Builder;
    ///
    /// let pool = Builder::new(30).allocator(|| Ok(0u32)).build().unwrap();
    /// assert_eq!(pool.available(), 3);
    /// ```
    pub fn available(&self) -> usize {
        self.shared.store.len()
    }

    /// Check whether the store currently holds no resources.
    pub fn is_empty(&self) -> bool {
        self.available() == 0
    }

    /// Maximum number of resources the store will hold.
    ///
    /// # Example
    ///
    /// ```rust
    /// use wellspring::Builder;
    ///
    /// let pool = Builder::new(10).allocator(|| Ok(0u32)).build().unwrap();
    /// assert_eq!(pool.capacity(), 10);
    /// ```
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Fill level the maintainer keeps the store at.
    pub fn minimum(&self) -> usize {
        self.shared.minimum
    }

    /// Shut the pool down.
    ///
    /// Signals the maintainer, waits for it to terminate, then drains the
    /// store through the deallocator (failures reported to the observer).
    /// Idempotent; later calls return immediately. Afterwards
    /// [`fetch`](Pool::fetch) fails with [`Error::Closed`] and released
    /// resources go straight to the deallocator.
    ///
    /// Dropping the pool performs the same teardown.
    pub fn close(&self) {
        if self.shared.shutdown.swap(true, AcqRel) {
            return;
        }
        let handle = self
            .handle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            let _ = handle.join();
        }
        while let Some(resource) = self.shared.store.pop() {
            self.shared.dispose(resource);
        }
    }
}

impl<T: Send + 'static> Drop for Pool<T> {
    fn drop(&mut self) {
        self.close();
        // A release racing the explicit close can push after its drain.
        while let Some(resource) = self.shared.store.pop() {
            self.shared.dispose(resource);
        }
    }
}

/// Configuration for a [`Pool`].
///
/// Usually assembled through a [`Builder`](crate::Builder); filling the
/// fields in directly is equivalent.
pub struct Config<T> {
    /// Maximum number of resources the store will hold. Must be at least
    /// [`MIN_CAPACITY`].
    pub capacity: usize,
    /// Fill level the maintainer keeps the store at. Must not exceed the
    /// capacity; defaults to a tenth of it.
    pub minimum: Option<usize>,
    /// Produces fresh resources. Mandatory.
    pub allocator: Option<Allocator<T>>,
    /// Disposes of resources the pool cannot retain. Defaults to dropping
    /// the value.
    pub deallocator: Deallocator<T>,
    /// Receives error and informational events. Defaults to
    /// [`TracingObserver`].
    pub observer: Arc<dyn Observer>,
    /// Idle-sleep used by the maintainer. Defaults to [`SystemClock`].
    pub clock: Arc<dyn Clock>,
}

impl<T> Config<T> {
    /// Create a configuration with the given capacity and everything else at
    /// its default.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            minimum: None,
            allocator: None,
            deallocator: Arc::new(|resource| {
                drop(resource);
                Ok(())
            }),
            observer: Arc::new(TracingObserver),
            clock: Arc::new(SystemClock),
        }
    }
}

impl<T> Clone for Config<T> {
    fn clone(&self) -> Self {
        Self {
            capacity: self.capacity,
            minimum: self.minimum,
            allocator: self.allocator.clone(),
            deallocator: Arc::clone(&self.deallocator),
            observer: Arc::clone(&self.observer),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<T> fmt::Debug for Config<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("capacity", &self.capacity)
            .field("minimum", &self.minimum)
            .field("allocator", &self.allocator.is_some())
            .finish_non_exhaustive()
    }
}
