use std::sync::{Arc, Mutex};

use wellspring::{Builder, ConfigError, Error, Observer, Pool};

/// Observer that records every event for later inspection.
#[derive(Clone, Default)]
struct Recording {
    errors: Arc<Mutex<Vec<String>>>,
    messages: Arc<Mutex<Vec<String>>>,
}

impl Observer for Recording {
    fn error(&self, error: &Error) {
        self.errors.lock().unwrap().push(error.to_string());
    }

    fn message(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_owned());
    }
}

#[test]
fn build_with_default_minimum() {
    let pool = Builder::new(30).allocator(|| Ok(0u32)).build().unwrap();
    assert_eq!(pool.capacity(), 30);
    assert_eq!(pool.minimum(), 3);
    assert_eq!(pool.available(), 3);
}

#[test]
fn build_with_explicit_minimum() {
    let pool = Builder::new(10)
        .minimum(0)
        .allocator(|| Ok(0u32))
        .build()
        .unwrap();
    assert_eq!(pool.minimum(), 0);
    assert_eq!(pool.available(), 0);
}

#[test]
fn capacity_below_lower_bound_is_rejected() {
    let result = Builder::new(9).allocator(|| Ok(0u32)).build();
    assert!(matches!(result, Err(ConfigError::CapacityTooSmall(9))));
}

#[test]
fn minimum_exceeding_capacity_is_rejected() {
    let result = Builder::new(10).minimum(11).allocator(|| Ok(0u32)).build();
    assert!(matches!(
        result,
        Err(ConfigError::MinimumExceedsCapacity {
            minimum: 11,
            capacity: 10,
        })
    ));
}

#[test]
fn missing_allocator_is_rejected() {
    let result = Builder::<u32>::new(10).build();
    assert!(matches!(result, Err(ConfigError::MissingAllocator)));
}

#[test]
fn validation_runs_before_preallocation() {
    // An invalid configuration must fail before the allocator is ever called.
    let result = Builder::<u32>::new(9)
        .allocator(|| panic!("allocator must not run"))
        .build();
    assert!(matches!(result, Err(ConfigError::CapacityTooSmall(9))));
}

#[test]
fn prefill_failures_are_reported_not_fatal() {
    let observer = Recording::default();
    let errors = Arc::clone(&observer.errors);
    let pool: Pool<u32> = Builder::new(10)
        .minimum(1)
        .allocator(|| Err("backend down".into()))
        .observer(observer)
        .build()
        .unwrap();
    assert_eq!(pool.available(), 0);
    assert!(!errors.lock().unwrap().is_empty());
    assert!(errors.lock().unwrap()[0].contains("backend down"));
    pool.close();
}

#[test]
fn observer_receives_allocation_messages() {
    let observer = Recording::default();
    let messages = Arc::clone(&observer.messages);
    let pool = Builder::new(20)
        .minimum(2)
        .allocator(|| Ok(0u32))
        .observer(observer)
        .build()
        .unwrap();
    assert_eq!(pool.available(), 2);
    let recorded = messages.lock().unwrap();
    assert!(recorded.iter().filter(|m| *m == "resource allocated").count() >= 2);
}
