//! Core domain types
//!
//! This module contains the domain structures shared by the HTTP client,
//! the job poller and the command-line front end. The backend owns every
//! job; these types only describe what the client observes.

pub mod job;
pub mod preferences;
pub mod usage;
