//! Vidmeta Job Poller
//!
//! Watches a backend generation job until it settles.
//!
//! Architecture:
//! - Configuration: Backoff and error-ceiling parameters
//! - Scheduler: The poll session state machine and its backoff policy
//! - State: The snapshot published to observers after every change
//!
//! The poller is independent of any front end. A caller starts it with a
//! job id, observes [`PollState`] through a watch channel, and renders
//! whatever it sees. Failures never escape the poller; they are reported
//! through [`PollState::error`] together with `polling == false`.

pub mod config;
pub mod scheduler;
pub mod state;

pub use config::PollConfig;
pub use scheduler::{Backoff, JobPoller};
pub use state::{PollError, PollErrorKind, PollState};
