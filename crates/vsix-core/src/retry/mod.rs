//! Opt-in bounded retry for network-flaky transfers.
//!
//! The stock behavior is a single attempt per call; retries are enabled
//! only through the `[retry]` section of the config file. Only transport
//! errors (timeout, connection) and HTTP 5xx are ever retried — 4xx and
//! unparseable responses fail immediately.

mod classify;
mod policy;

pub use classify::{classify, run_with_retry};
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
