use std::sync::Arc;
use std::sync::atomic::Ordering::*;
use std::time::Duration;

use crate::Error;
use crate::pool::Shared;

/// How long the maintainer rests when the store does not need topping up.
pub(crate) const IDLE_INTERVAL: Duration = Duration::from_millis(100);

/// Replenishment loop, one thread per pool.
///
/// The shutdown flag is checked once per iteration; once observed the loop
/// terminates permanently.
pub(crate) fn run<T: Send + 'static>(shared: Arc<Shared<T>>) {
    loop {
        if shared.shutdown.load(Acquire) {
            shared.observer.message("pool maintainer exiting");
            return;
        }
        if shared.store.len() < shared.minimum {
            match (shared.allocator)() {
                Ok(resource) => {
                    shared.observer.message("resource allocated");
                    // Pushes only happen below minimum, so the store has room
                    // unless callers raced it to full; the surplus goes to the
                    // deallocator instead of blocking.
                    if let Err(resource) = shared.store.push(resource) {
                        shared.dispose(resource);
                    }
                }
                Err(source) => {
                    shared.observer.error(&Error::Allocation(source));
                    // No placeholder enters the store; rest one interval so a
                    // persistently failing allocator is retried, not spun on.
                    shared.clock.idle(IDLE_INTERVAL);
                }
            }
        } else {
            shared.clock.idle(IDLE_INTERVAL);
        }
    }
}
