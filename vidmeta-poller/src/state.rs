//! Observable poller state

use std::fmt;
use std::time::Duration;

use vidmeta_client::ClientError;
use vidmeta_core::domain::job::JobRecord;

/// Snapshot published by [`crate::JobPoller`] after every change
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PollState {
    /// Session this snapshot belongs to
    pub(crate) session: u64,

    /// Job being watched, if the last `start` was given a valid id
    pub job_id: Option<String>,

    /// Latest record fetched for the job
    pub job: Option<JobRecord>,

    /// True while further fetches are scheduled or in flight
    pub polling: bool,

    /// Error from the most recent fetch, cleared by the next success
    pub error: Option<PollError>,

    /// Fetches completed in this session
    pub attempts: u32,

    /// Failed fetches since the last success
    pub consecutive_errors: u32,

    /// Wait before the next fetch, while one is scheduled
    pub next_delay: Option<Duration>,
}

impl PollState {
    pub(crate) fn idle(session: u64) -> Self {
        Self {
            session,
            ..Default::default()
        }
    }

    pub(crate) fn started(session: u64, job_id: &str) -> Self {
        Self {
            session,
            job_id: Some(job_id.to_string()),
            polling: true,
            ..Default::default()
        }
    }

    pub fn session(&self) -> u64 {
        self.session
    }

    /// True once polling stopped because of an error rather than a job outcome
    pub fn gave_up(&self) -> bool {
        !self.polling && self.error.is_some()
    }
}

/// Category of a failed fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollErrorKind {
    /// The backend does not know the job; polling stops immediately
    NotFound,
    /// Network or server failure; retried until the error ceiling
    Transient,
    /// Response could not be decoded; retried like a transient failure
    Malformed,
}

/// Error exposed to observers of the poller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollError {
    pub kind: PollErrorKind,
    pub status: Option<u16>,
    pub message: String,
}

impl PollError {
    pub fn is_fatal(&self) -> bool {
        self.kind == PollErrorKind::NotFound
    }
}

impl From<&ClientError> for PollError {
    fn from(err: &ClientError) -> Self {
        let kind = if err.is_not_found() {
            PollErrorKind::NotFound
        } else if err.is_malformed() {
            PollErrorKind::Malformed
        } else {
            PollErrorKind::Transient
        };

        Self {
            kind,
            status: err.status(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for PollError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for PollError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let not_found = PollError::from(&ClientError::from_status(404, "Job not found"));
        assert_eq!(not_found.kind, PollErrorKind::NotFound);
        assert_eq!(not_found.status, Some(404));
        assert!(not_found.is_fatal());

        let server = PollError::from(&ClientError::from_status(502, "bad gateway"));
        assert_eq!(server.kind, PollErrorKind::Transient);
        assert!(!server.is_fatal());

        let malformed = PollError::from(&ClientError::ParseError("eof".to_string()));
        assert_eq!(malformed.kind, PollErrorKind::Malformed);
        assert_eq!(malformed.status, None);
    }

    #[test]
    fn test_idle_state_is_empty() {
        let state = PollState::idle(3);
        assert_eq!(state.session(), 3);
        assert!(!state.polling);
        assert!(state.job.is_none());
        assert!(state.error.is_none());
        assert!(!state.gave_up());
    }
}
