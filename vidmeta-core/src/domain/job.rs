//! Job domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical job record as observed from the backend
///
/// The client never creates one of these; it is produced by normalizing
/// whatever shape the backend returned (see [`crate::dto::job::RawJob`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: String,
    pub status: JobStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub error: Option<String>,
    pub result: Option<JobOutputs>,
    pub video_url: Option<String>,
    pub video_id: Option<String>,
}

impl JobRecord {
    /// True when the record carries a non-empty generated result
    pub fn has_result(&self) -> bool {
        self.result.as_ref().is_some_and(|r| !r.is_empty())
    }

    /// True when no further change is expected for this job
    ///
    /// A populated result counts as completion even when the status field
    /// still reports work in progress; the backend does not always sync it.
    pub fn is_finished(&self) -> bool {
        self.status.is_terminal() || self.has_result()
    }
}

/// Job lifecycle status
///
/// `Completed` and `Done` are both reported by the backend for success.
/// Unrecognized values are preserved in `Unknown` and treated as in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Done,
    Failed,
    Unknown(String),
}

impl JobStatus {
    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Done => "done",
            JobStatus::Failed => "failed",
            JobStatus::Unknown(other) => other,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Completed | JobStatus::Done | JobStatus::Failed
        )
    }

    pub fn is_success(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Done)
    }
}

impl From<String> for JobStatus {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "pending" => JobStatus::Pending,
            "processing" => JobStatus::Processing,
            "completed" => JobStatus::Completed,
            "done" => JobStatus::Done,
            "failed" => JobStatus::Failed,
            _ => JobStatus::Unknown(value),
        }
    }
}

impl From<JobStatus> for String {
    fn from(status: JobStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata generated for a video
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobOutputs {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub summary: Vec<String>,
    #[serde(default)]
    pub social_caption: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hashtags: Option<Vec<String>>,
}

impl JobOutputs {
    pub fn is_empty(&self) -> bool {
        self.description.is_empty()
            && self.tags.is_empty()
            && self.summary.is_empty()
            && self.social_caption.is_empty()
            && self.hashtags.as_ref().is_none_or(|h| h.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(status: JobStatus, result: Option<JobOutputs>) -> JobRecord {
        JobRecord {
            id: "3f2b8c1e-9d4a-4b7e-8c21-5a6f0e9d1b34".to_string(),
            status,
            created_at: None,
            updated_at: None,
            error: None,
            result,
            video_url: None,
            video_id: None,
        }
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!(JobStatus::from("completed".to_string()), JobStatus::Completed);
        assert_eq!(JobStatus::from("DONE".to_string()), JobStatus::Done);
        assert_eq!(
            JobStatus::from("archived".to_string()),
            JobStatus::Unknown("archived".to_string())
        );
    }

    #[test]
    fn test_status_serde() {
        let status: JobStatus = serde_json::from_str("\"processing\"").unwrap();
        assert_eq!(status, JobStatus::Processing);
        assert_eq!(serde_json::to_string(&JobStatus::Done).unwrap(), "\"done\"");
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(JobStatus::Completed.is_terminal());
        assert!(JobStatus::Done.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
        assert!(!JobStatus::Pending.is_terminal());
        assert!(!JobStatus::Processing.is_terminal());
        assert!(!JobStatus::Unknown("queued-remote".to_string()).is_terminal());
        assert!(!JobStatus::Failed.is_success());
    }

    #[test]
    fn test_result_counts_as_finished() {
        let outputs = JobOutputs {
            description: "A walkthrough".to_string(),
            ..Default::default()
        };
        assert!(record(JobStatus::Processing, Some(outputs)).is_finished());
        assert!(!record(JobStatus::Processing, Some(JobOutputs::default())).is_finished());
        assert!(!record(JobStatus::Pending, None).is_finished());
    }

    #[test]
    fn test_empty_hashtags_still_empty() {
        let outputs = JobOutputs {
            hashtags: Some(vec![]),
            ..Default::default()
        };
        assert!(outputs.is_empty());
    }
}
