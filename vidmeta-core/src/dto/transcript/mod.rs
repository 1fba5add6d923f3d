//! Transcript upload DTOs

use serde::{Deserialize, Serialize};

/// Transcript text extracted by the backend from an uploaded file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptUpload {
    pub transcript: String,
}
