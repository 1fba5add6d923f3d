//! Job DTOs for communication with the metadata backend

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::domain::job::{JobOutputs, JobRecord, JobStatus};
use crate::domain::preferences::{Provider, Tone};

/// Request to queue a new metadata generation job
///
/// Either `youtube_url` or `transcript` must be set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_override: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<Tone>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<Provider>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Response to an accepted generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub job_id: String,
}

/// Reasons a backend job payload cannot be turned into a [`JobRecord`]
#[derive(Debug, Error, PartialEq)]
pub enum NormalizeError {
    #[error("job payload has neither 'job_id' nor 'id'")]
    MissingId,

    #[error("job payload has no 'status'")]
    MissingStatus,

    #[error("job outputs have an unexpected shape: {0}")]
    InvalidOutputs(String),
}

/// Job payload exactly as the backend sends it
///
/// Different endpoints and backend versions use `job_id` or `id`,
/// `outputs`, `output` or `result`, and `error` or `error_message`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawJob {
    #[serde(default)]
    pub job_id: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub status: Option<JobStatus>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub outputs: Option<JsonValue>,
    #[serde(default)]
    pub output: Option<JsonValue>,
    #[serde(default)]
    pub result: Option<JsonValue>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub video_id: Option<String>,
}

impl RawJob {
    /// Normalize into the canonical record
    pub fn normalize(self) -> Result<JobRecord, NormalizeError> {
        let id = self
            .job_id
            .or(self.id)
            .filter(|id| !id.is_empty())
            .ok_or(NormalizeError::MissingId)?;
        let status = self.status.ok_or(NormalizeError::MissingStatus)?;

        let outputs = [self.outputs, self.output, self.result]
            .into_iter()
            .flatten()
            .find(|value| !is_blank(value));
        let result = outputs
            .map(|value| {
                serde_json::from_value::<JobOutputs>(value)
                    .map_err(|e| NormalizeError::InvalidOutputs(e.to_string()))
            })
            .transpose()?;

        Ok(JobRecord {
            id,
            status,
            created_at: self.created_at.as_deref().and_then(parse_timestamp),
            updated_at: self.updated_at.as_deref().and_then(parse_timestamp),
            error: self.error.or(self.error_message),
            result,
            video_url: self.video_url,
            video_id: self.video_id,
        })
    }
}

/// Job listing, either a bare array or wrapped in `{ "jobs": [...] }`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum JobList {
    Bare(Vec<RawJob>),
    Wrapped {
        #[serde(default)]
        jobs: Vec<RawJob>,
    },
}

impl JobList {
    pub fn into_jobs(self) -> Vec<RawJob> {
        match self {
            JobList::Bare(jobs) | JobList::Wrapped { jobs } => jobs,
        }
    }
}

fn is_blank(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => true,
        JsonValue::Object(map) => map.is_empty(),
        JsonValue::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Parse an RFC 3339 timestamp, or a naive one assumed to be UTC
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: JsonValue) -> RawJob {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_normalize_job_id_and_outputs() {
        let job = raw(json!({
            "job_id": "9b1e4c52-7d0f-4a3e-b6a8-2c5d9e0f1a7b",
            "status": "completed",
            "created_at": "2025-03-02T10:15:00Z",
            "updated_at": "2025-03-02T10:16:30.123456",
            "outputs": {
                "description": "How to sharpen a chisel",
                "tags": ["woodworking", "tools"],
                "summary": ["Flatten the back", "Hone the bevel"],
                "social_caption": "Sharp tools, happy hands",
                "hashtags": ["woodworking"]
            }
        }))
        .normalize()
        .unwrap();

        assert_eq!(job.id, "9b1e4c52-7d0f-4a3e-b6a8-2c5d9e0f1a7b");
        assert_eq!(job.status, JobStatus::Completed);
        assert!(job.created_at.is_some());
        assert!(job.updated_at.is_some());
        let result = job.result.unwrap();
        assert_eq!(result.tags, vec!["woodworking", "tools"]);
        assert_eq!(result.hashtags, Some(vec!["woodworking".to_string()]));
    }

    #[test]
    fn test_normalize_alternate_field_names() {
        let job = raw(json!({
            "id": "9b1e4c52-7d0f-4a3e-b6a8-2c5d9e0f1a7b",
            "status": "failed",
            "error_message": "transcript unavailable",
            "output": null
        }))
        .normalize()
        .unwrap();

        assert_eq!(job.status, JobStatus::Failed);
        assert_eq!(job.error.as_deref(), Some("transcript unavailable"));
        assert!(job.result.is_none());
    }

    #[test]
    fn test_empty_outputs_object_is_no_result() {
        let job = raw(json!({
            "job_id": "9b1e4c52-7d0f-4a3e-b6a8-2c5d9e0f1a7b",
            "status": "processing",
            "outputs": {}
        }))
        .normalize()
        .unwrap();
        assert!(job.result.is_none());
        assert!(!job.is_finished());
    }

    #[test]
    fn test_missing_id_is_rejected() {
        let err = raw(json!({ "status": "pending" })).normalize().unwrap_err();
        assert_eq!(err, NormalizeError::MissingId);
    }

    #[test]
    fn test_malformed_outputs_are_rejected() {
        let err = raw(json!({
            "job_id": "abc",
            "status": "done",
            "outputs": { "tags": "not-a-list" }
        }))
        .normalize()
        .unwrap_err();
        assert!(matches!(err, NormalizeError::InvalidOutputs(_)));
    }

    #[test]
    fn test_unparseable_timestamp_is_dropped() {
        let job = raw(json!({
            "job_id": "abc",
            "status": "pending",
            "created_at": "yesterday"
        }))
        .normalize()
        .unwrap();
        assert!(job.created_at.is_none());
    }

    #[test]
    fn test_job_list_shapes() {
        let bare: JobList = serde_json::from_value(json!([
            { "job_id": "a", "status": "done" }
        ]))
        .unwrap();
        assert_eq!(bare.into_jobs().len(), 1);

        let wrapped: JobList = serde_json::from_value(json!({
            "jobs": [
                { "id": "a", "status": "done" },
                { "id": "b", "status": "pending" }
            ]
        }))
        .unwrap();
        assert_eq!(wrapped.into_jobs().len(), 2);

        let empty: JobList = serde_json::from_value(json!({})).unwrap();
        assert!(empty.into_jobs().is_empty());
    }

    #[test]
    fn test_generate_request_skips_unset_fields() {
        let req = GenerateRequest {
            youtube_url: Some("https://youtu.be/dQw4w9WgXcQ".to_string()),
            tone: Some(Tone::Casual),
            ..Default::default()
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, json!({
            "youtube_url": "https://youtu.be/dQw4w9WgXcQ",
            "tone": "casual"
        }));
    }
}
