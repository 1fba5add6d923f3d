//! Scheduler layer for the poller
//!
//! This layer drives repeated job fetches for one watched job at a time,
//! spacing them with capped exponential backoff and stopping on a terminal
//! job state, a missing job, or too many consecutive failures.

pub mod backoff;
pub mod poller;

pub use backoff::Backoff;
pub use poller::JobPoller;
