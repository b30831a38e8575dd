use std::sync::Arc;

use crate::error::{CallbackError, ConfigError};
use crate::{Clock, Config, Observer, Pool};

/// A builder for creating a [`Pool`] with custom configuration.
///
/// # Example
///
/// ```rust
/// use wellspring::Builder;
///
/// let pool = Builder::new(10)
///     .minimum(2)
///     .allocator(|| Ok(0u32))
///     .build()
///     .unwrap();
/// assert_eq!(pool.capacity(), 10);
/// assert_eq!(pool.minimum(), 2);
/// ```
pub struct Builder<T> {
    /// Configuration of the pool.
    config: Config<T>,
}

impl<T: Send + 'static> Builder<T> {
    /// Create a new builder for a pool of the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            config: Config::new(capacity),
        }
    }

    /// Set the fill level the maintainer keeps the store at.
    ///
    /// Defaults to a tenth of the capacity.
    pub fn minimum(&mut self, minimum: usize) -> &mut Self {
        self.config.minimum = Some(minimum);
        self
    }

    /// Set the function producing fresh resources. Mandatory.
    pub fn allocator<F>(&mut self, allocator: F) -> &mut Self
    where
        F: Fn() -> Result<T, CallbackError> + Send + Sync + 'static,
    {
        self.config.allocator = Some(Arc::new(allocator));
        self
    }

    /// Set the function disposing of resources the pool cannot retain.
    ///
    /// Defaults to dropping the value.
    pub fn deallocator<F>(&mut self, deallocator: F) -> &mut Self
    where
        F: Fn(T) -> Result<(), CallbackError> + Send + Sync + 'static,
    {
        self.config.deallocator = Arc::new(deallocator);
        self
    }

    /// Set the observer receiving error and informational events.
    pub fn observer(&mut self, observer: impl Observer) -> &mut Self {
        self.config.observer = Arc::new(observer);
        self
    }

    /// Set the clock the maintainer idles with.
    pub fn clock(&mut self, clock: impl Clock) -> &mut Self {
        self.config.clock = Arc::new(clock);
        self
    }

    /// Build the pool with the current configuration.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] if the configuration is invalid; see
    /// [`Pool::with_config`].
    pub fn build(&mut self) -> Result<Pool<T>, ConfigError> {
        Pool::with_config(self.config.clone())
    }
}
