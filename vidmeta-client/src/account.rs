//! Account-related API endpoints

use reqwest::multipart::{Form, Part};
use vidmeta_core::domain::preferences::UserPreferences;
use vidmeta_core::domain::usage::UsageStats;
use vidmeta_core::dto::transcript::TranscriptUpload;

use crate::ApiClient;
use crate::error::Result;

impl ApiClient {
    // =============================================================================
    // Usage & Preferences
    // =============================================================================

    /// Get generation usage for the signed-in account
    pub async fn usage_stats(&self, token: Option<&str>) -> Result<UsageStats> {
        let url = self.url("usage");
        let response = Self::authorized(self.client.get(&url), token)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Store preferences on the backend
    ///
    /// Only paid tiers keep server-side preferences; other accounts get an
    /// error status here, which callers are expected to tolerate.
    pub async fn save_preferences(
        &self,
        preferences: &UserPreferences,
        token: Option<&str>,
    ) -> Result<()> {
        let url = self.url("preferences");
        let response = Self::authorized(self.client.post(&url), token)
            .json(preferences)
            .send()
            .await?;

        self.handle_empty_response(response).await
    }

    // =============================================================================
    // Transcripts
    // =============================================================================

    /// Upload a transcript file and get its extracted text back
    ///
    /// # Arguments
    /// * `file_name` - Name reported to the backend (the extension selects the parser)
    /// * `contents` - Raw file bytes
    /// * `token` - Bearer token of the signed-in user
    pub async fn upload_transcript(
        &self,
        file_name: &str,
        contents: Vec<u8>,
        token: Option<&str>,
    ) -> Result<TranscriptUpload> {
        let url = self.url("upload-transcript");
        let part = Part::bytes(contents).file_name(file_name.to_string());
        let form = Form::new().part("file", part);

        let response = Self::authorized(self.client.post(&url), token)
            .multipart(form)
            .send()
            .await?;

        self.handle_response(response).await
    }
}
