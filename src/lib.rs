//! A concurrent, self-replenishing resource pool.
//!
//! # Features
//!
//! - Bounded store handing out exclusive ownership of expensive-to-create
//!   resources (connections, buffers, sessions).
//! - Background maintainer thread that keeps a minimum number of resources
//!   ready at all times.
//! - Non-blocking hot path: fetching falls back to allocating on the
//!   caller's path, returning falls back to asynchronous disposal when the
//!   store is full.
//! - Injectable observer and clock, so reporting and the maintainer's idle
//!   interval stay testable.
//!
//! Resources are opaque to the pool; they are created and destroyed
//! exclusively through the configured allocator and deallocator callbacks.
//!
//! # Examples
//!
//! ## Single threaded
//!
//! ```rust
//! use wellspring::Builder;
//!
//! let pool = Builder::new(10)
//!     .allocator(|| Ok(Vec::<u8>::with_capacity(4096)))
//!     .build()
//!     .unwrap();
//!
//! // Default minimum is a tenth of the capacity.
//! assert_eq!(pool.available(), 1);
//! let buffer = pool.fetch().unwrap();
//! pool.release(buffer);
//! ```
//!
//! ## Shared across threads
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use wellspring::Builder;
//!
//! let pool = Arc::new(
//!     Builder::new(20)
//!         .minimum(2)
//!         .allocator(|| Ok(String::with_capacity(1024)))
//!         .build()
//!         .unwrap(),
//! );
//!
//! let mut workers = Vec::new();
//! for _ in 0..4 {
//!     let pool = Arc::clone(&pool);
//!     workers.push(std::thread::spawn(move || {
//!         let buffer = pool.fetch().unwrap();
//!         pool.release(buffer);
//!     }));
//! }
//! for worker in workers {
//!     worker.join().unwrap();
//! }
//! pool.close();
//! ```

mod builder;
mod clock;
mod error;
mod maintainer;
mod observer;
mod pool;

pub use builder::Builder;
pub use clock::{Clock, SystemClock};
pub use error::{CallbackError, ConfigError, Error};
pub use observer::{Observer, TracingObserver};
pub use pool::{Allocator, Config, Deallocator, MIN_CAPACITY, Pool};
