//! Job-related API endpoints

use async_trait::async_trait;
use tracing::debug;
use vidmeta_core::domain::job::JobRecord;
use vidmeta_core::dto::job::{GenerateRequest, GenerateResponse, JobList, RawJob};

use crate::ApiClient;
use crate::error::{ClientError, Result};

/// Single-job lookup used by the job poller
///
/// [`ApiClient`] is the production implementation; tests substitute
/// scripted fetchers.
#[async_trait]
pub trait JobFetcher: Send + Sync {
    /// Fetch the current state of a job
    ///
    /// Fails with [`ClientError::NotFound`] when the backend does not know
    /// the id, and with another variant for any other failure.
    async fn fetch_job(&self, job_id: &str, token: Option<&str>) -> Result<JobRecord>;
}

impl ApiClient {
    // =============================================================================
    // Job Lifecycle
    // =============================================================================

    /// Queue a new metadata generation job
    ///
    /// # Arguments
    /// * `req` - The generation request (video URL or transcript plus options)
    /// * `token` - Bearer token of the signed-in user
    ///
    /// # Returns
    /// The id of the queued job
    ///
    /// # Example
    /// ```no_run
    /// # use vidmeta_client::ApiClient;
    /// # use vidmeta_core::dto::job::GenerateRequest;
    /// # async fn example() -> vidmeta_client::Result<()> {
    /// let client = ApiClient::new("http://localhost:8000");
    /// let queued = client.generate(&GenerateRequest {
    ///     youtube_url: Some("https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string()),
    ///     ..Default::default()
    /// }, None).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn generate(
        &self,
        req: &GenerateRequest,
        token: Option<&str>,
    ) -> Result<GenerateResponse> {
        if req.youtube_url.is_none() && req.transcript.is_none() {
            return Err(ClientError::InvalidRequest(
                "either a YouTube URL or a transcript is required".to_string(),
            ));
        }

        let url = self.url("generate");
        let response = Self::authorized(self.client.post(&url), token)
            .json(req)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Get a job by ID
    ///
    /// # Arguments
    /// * `job_id` - The job identifier
    /// * `token` - Bearer token of the signed-in user
    ///
    /// # Returns
    /// The normalized job record
    pub async fn get_job(&self, job_id: &str, token: Option<&str>) -> Result<JobRecord> {
        let url = self.url(&format!("jobs/{}", job_id));
        let response = Self::authorized(self.client.get(&url), token)
            .send()
            .await?;

        let raw: RawJob = self.handle_response(response).await?;
        raw.normalize()
            .map_err(|e| ClientError::ParseError(format!("Invalid job payload: {}", e)))
    }

    /// List the signed-in user's recent jobs
    ///
    /// Entries that cannot be normalized are skipped rather than failing
    /// the whole listing.
    pub async fn list_recent_jobs(&self, token: Option<&str>) -> Result<Vec<JobRecord>> {
        let url = self.url("jobs");
        let response = Self::authorized(self.client.get(&url), token)
            .send()
            .await?;

        let list: JobList = self.handle_response(response).await?;
        let jobs = list
            .into_jobs()
            .into_iter()
            .filter_map(|raw| match raw.normalize() {
                Ok(job) => Some(job),
                Err(e) => {
                    debug!("Skipping malformed job in listing: {}", e);
                    None
                }
            })
            .collect();

        Ok(jobs)
    }
}

#[async_trait]
impl JobFetcher for ApiClient {
    async fn fetch_job(&self, job_id: &str, token: Option<&str>) -> Result<JobRecord> {
        self.get_job(job_id, token).await
    }
}
