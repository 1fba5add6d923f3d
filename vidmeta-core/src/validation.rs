//! Input validation
//!
//! Cheap local checks run before any request is sent, so placeholder ids
//! and obviously wrong URLs never reach the backend.

use thiserror::Error;
use uuid::Uuid;

/// Default upper bound for a pasted or uploaded transcript
pub const DEFAULT_MAX_TRANSCRIPT_BYTES: usize = 500_000;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Transcript is too large ({size_kb:.1}KB). Maximum size is {max_kb:.0}KB.")]
    TranscriptTooLarge { size_kb: f64, max_kb: f64 },
}

/// Check whether `job_id` names a real job
///
/// Accepts only the hyphenated 8-4-4-4-12 hexadecimal form (any case) and
/// rejects the all-zero id, which the backend uses to mean "no job".
pub fn is_valid_job_id(job_id: &str) -> bool {
    let bytes = job_id.as_bytes();
    if bytes.len() != 36 {
        return false;
    }

    let shape_ok = bytes.iter().enumerate().all(|(i, b)| match i {
        8 | 13 | 18 | 23 => *b == b'-',
        _ => b.is_ascii_hexdigit(),
    });
    if !shape_ok {
        return false;
    }

    Uuid::try_parse(job_id).is_ok_and(|id| !id.is_nil())
}

/// Check whether `url` points at a single YouTube video
///
/// Matches `youtube.com/watch?v=<id>` and `youtu.be/<id>`, with or without
/// scheme and `www.`, where `<id>` is the 11 character video id.
pub fn is_valid_youtube_url(url: &str) -> bool {
    let mut rest = url.trim();

    for scheme in ["https://", "http://"] {
        if let Some(stripped) = rest.strip_prefix(scheme) {
            rest = stripped;
            break;
        }
    }
    rest = rest.strip_prefix("www.").unwrap_or(rest);

    let Some(video_part) = rest
        .strip_prefix("youtube.com/watch?v=")
        .or_else(|| rest.strip_prefix("youtu.be/"))
    else {
        return false;
    };

    let id_len = video_part
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_' || *b == b'-')
        .count();
    id_len >= 11
}

/// Reject transcripts larger than `max_bytes`
pub fn validate_transcript_size(transcript: &str, max_bytes: usize) -> Result<(), ValidationError> {
    let size = transcript.len();
    if size > max_bytes {
        return Err(ValidationError::TranscriptTooLarge {
            size_kb: size as f64 / 1024.0,
            max_kb: max_bytes as f64 / 1024.0,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_id_accepts_uuid() {
        assert!(is_valid_job_id("3f2b8c1e-9d4a-4b7e-8c21-5a6f0e9d1b34"));
        assert!(is_valid_job_id("3F2B8C1E-9D4A-4B7E-8C21-5A6F0E9D1B34"));
        assert!(is_valid_job_id(&Uuid::new_v4().to_string()));
    }

    #[test]
    fn test_job_id_rejects_placeholders() {
        assert!(!is_valid_job_id(""));
        assert!(!is_valid_job_id("00000000-0000-0000-0000-000000000000"));
        assert!(!is_valid_job_id("undefined"));
        assert!(!is_valid_job_id("3f2b8c1e9d4a4b7e8c215a6f0e9d1b34"));
        assert!(!is_valid_job_id("{3f2b8c1e-9d4a-4b7e-8c21-5a6f0e9d1b34}"));
        assert!(!is_valid_job_id("3f2b8c1e-9d4a-4b7e-8c21-5a6f0e9d1b3g"));
        assert!(!is_valid_job_id("3f2b8c1e-9d4a-4b7e8-c21-5a6f0e9d1b34"));
    }

    #[test]
    fn test_youtube_urls() {
        assert!(is_valid_youtube_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ"));
        assert!(is_valid_youtube_url("http://youtube.com/watch?v=dQw4w9WgXcQ&t=42"));
        assert!(is_valid_youtube_url("youtu.be/dQw4w9WgXcQ"));
        assert!(is_valid_youtube_url("  https://youtu.be/dQw4w9WgXcQ?si=abc  "));

        assert!(!is_valid_youtube_url(""));
        assert!(!is_valid_youtube_url("https://vimeo.com/123456789"));
        assert!(!is_valid_youtube_url("https://www.youtube.com/watch?v=short"));
        assert!(!is_valid_youtube_url("https://www.youtube.com/playlist?list=PLrAXtmRdnEQy"));
        assert!(!is_valid_youtube_url("ftp://youtu.be/dQw4w9WgXcQ"));
    }

    #[test]
    fn test_transcript_size() {
        assert!(validate_transcript_size("short transcript", DEFAULT_MAX_TRANSCRIPT_BYTES).is_ok());

        let big = "a".repeat(2048);
        let err = validate_transcript_size(&big, 1024).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Transcript is too large (2.0KB). Maximum size is 1KB."
        );
    }
}
