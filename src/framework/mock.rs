//! # Mock Framework
//!
//! Utilities for testing pollers without a network.
//!
//! [`MockSource`] is a [`PollSource`] that plays back scripted outcomes, one per
//! call to `poll()`. Each outcome can be delayed, which makes overlapping and
//! out-of-order cycles easy to reproduce under `tokio::time::pause`.
//!
//! ```ignore
//! let mock = MockSource::new("orders", Vec::new());
//! mock.expect_poll().return_ok(vec![order_1]);
//! mock.expect_poll().return_err("connection refused");
//! mock.expect_poll().after(Duration::from_secs(2)).return_ok(vec![order_1, order_2]);
//!
//! let (poller, reader) = Poller::new(mock.clone(), interval, Schedule::FixedDelay);
//! // drive the poller...
//! mock.verify(); // Ensures every scripted outcome was consumed
//! ```

use crate::framework::PollSource;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::fmt::Debug;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Error returned by a scripted failure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Mock failure: {0}")]
pub struct MockError(pub String);

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// One scripted `poll()` outcome.
struct Expectation<T> {
    delay: Duration,
    response: Result<T, MockError>,
}

/// A poll source that replays expectations in order.
///
/// Cloning shares the script, so a test can keep a handle for `verify()` after
/// moving a clone into a poller.
#[derive(Clone)]
pub struct MockSource<T> {
    name: String,
    initial: T,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
    calls: Arc<Mutex<usize>>,
}

impl<T: Clone + Send + Sync + Debug + 'static> MockSource<T> {
    /// Creates a mock with no expectations.
    pub fn new(name: impl Into<String>, initial: T) -> Self {
        Self {
            name: name.into(),
            initial,
            expectations: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    /// Expects one more `poll()` call.
    pub fn expect_poll(&self) -> PollExpectationBuilder<T> {
        PollExpectationBuilder {
            expectations: Arc::clone(&self.expectations),
            delay: Duration::ZERO,
        }
    }

    /// Number of `poll()` calls received so far.
    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }

    /// Panics if any scripted outcome was never consumed.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining > 0 {
            panic!("MockSource '{}': {} expectation(s) not met", self.name, remaining);
        }
    }
}

/// Builder for a `poll()` expectation.
pub struct PollExpectationBuilder<T> {
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
    delay: Duration,
}

impl<T> PollExpectationBuilder<T> {
    /// Delays the outcome, simulating a slow endpoint.
    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Sets the expectation to return a value.
    pub fn return_ok(self, value: T) {
        self.push(Ok(value));
    }

    /// Sets the expectation to fail.
    pub fn return_err(self, reason: impl Into<String>) {
        self.push(Err(MockError(reason.into())));
    }

    fn push(self, response: Result<T, MockError>) {
        self.expectations.lock().unwrap().push_back(Expectation {
            delay: self.delay,
            response,
        });
    }
}

#[async_trait]
impl<T: Clone + Send + Sync + Debug + 'static> PollSource for MockSource<T> {
    type Snapshot = T;
    type Error = MockError;

    fn name(&self) -> &str {
        &self.name
    }

    fn initial(&self) -> T {
        self.initial.clone()
    }

    async fn poll(&self) -> Result<T, MockError> {
        *self.calls.lock().unwrap() += 1;
        // Release the lock before sleeping.
        let expectation = self.expectations.lock().unwrap().pop_front();
        let Some(expectation) = expectation else {
            panic!("MockSource '{}': unexpected poll", self.name);
        };
        if !expectation.delay.is_zero() {
            tokio::time::sleep(expectation.delay).await;
        }
        expectation.response
    }
}
