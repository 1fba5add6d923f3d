//! Generate command handler

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::*;
use std::fs;
use std::path::PathBuf;
use tracing::debug;
use vidmeta_client::ClientError;
use vidmeta_core::domain::preferences::{Provider, Tone, UserPreferences};
use vidmeta_core::dto::job::GenerateRequest;
use vidmeta_core::validation::{
    DEFAULT_MAX_TRANSCRIPT_BYTES, is_valid_youtube_url, validate_transcript_size,
};

use crate::commands::job::watch_job;
use crate::config::Config;

/// Arguments of `vidmeta generate`
#[derive(Args)]
pub struct GenerateArgs {
    /// YouTube video URL (youtube.com/watch?v=... or youtu.be/...)
    #[arg(required_unless_present = "transcript")]
    pub url: Option<String>,

    /// Plain-text transcript to use instead of fetching one from YouTube
    #[arg(long)]
    pub transcript: Option<PathBuf>,

    /// Title to use instead of the video's own
    #[arg(long)]
    pub title: Option<String>,

    /// Writing tone (casual, professional, humorous)
    #[arg(long)]
    pub tone: Option<Tone>,

    /// Model provider (openrouter, openai)
    #[arg(long)]
    pub provider: Option<Provider>,

    /// Model identifier
    #[arg(long)]
    pub model: Option<String>,

    /// Print the job id and return without watching it
    #[arg(long)]
    pub no_wait: bool,
}

/// Submit a generation job, then watch it unless `--no-wait` was given
pub async fn handle_generate(args: GenerateArgs, config: &Config) -> Result<()> {
    let no_wait = args.no_wait;
    let preferences = config.preferences().load();
    let request = build_request(args, &preferences)?;

    debug!(
        "Submitting generation (provider: {:?}, model: {:?}, tone: {:?})",
        request.provider, request.model, request.tone
    );

    let token = config.token_provider().token().await;
    let queued = match config.client().generate(&request, token.as_deref()).await {
        Ok(queued) => queued,
        Err(ClientError::RateLimited(_)) => {
            bail!("Too many requests. Wait a moment before generating again.")
        }
        Err(ClientError::TokenLimitExceeded(message)) => {
            bail!("{}\nUpgrade your plan or try a shorter video.", message)
        }
        Err(e) => return Err(e).context("Failed to submit generation"),
    };

    println!("{}", "✓ Generation queued".green());
    println!("  Job ID: {}", queued.job_id.cyan());

    if no_wait {
        println!(
            "{}",
            format!("  Follow with: vidmeta job watch {}", queued.job_id).dimmed()
        );
        return Ok(());
    }

    println!();
    watch_job(config, &queued.job_id).await
}

/// Validate the inputs and fill unset options from saved preferences
fn build_request(args: GenerateArgs, preferences: &UserPreferences) -> Result<GenerateRequest> {
    if let Some(url) = &args.url
        && !is_valid_youtube_url(url)
    {
        bail!("'{}' is not a YouTube video URL", url);
    }

    let transcript = match &args.transcript {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read transcript {:?}", path))?;
            validate_transcript_size(&text, DEFAULT_MAX_TRANSCRIPT_BYTES)?;
            Some(text)
        }
        None => None,
    };

    if args.url.is_none() && transcript.is_none() {
        bail!("Pass a YouTube URL or --transcript FILE");
    }

    let provider = args.provider.unwrap_or(preferences.provider);
    let model = args.model.unwrap_or_else(|| {
        if provider == preferences.provider {
            preferences.default_model.clone()
        } else {
            provider.default_model().to_string()
        }
    });

    Ok(GenerateRequest {
        youtube_url: args.url.map(|u| u.trim().to_string()),
        transcript,
        title_override: args.title.filter(|t| !t.trim().is_empty()),
        tone: Some(args.tone.unwrap_or(preferences.default_tone)),
        provider: Some(provider),
        model: Some(model),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args(url: Option<&str>) -> GenerateArgs {
        GenerateArgs {
            url: url.map(str::to_string),
            transcript: None,
            title: None,
            tone: None,
            provider: None,
            model: None,
            no_wait: false,
        }
    }

    #[test]
    fn test_fills_from_preferences() {
        let prefs = UserPreferences {
            default_tone: Tone::Casual,
            ..Default::default()
        };
        let req = build_request(args(Some("https://youtu.be/dQw4w9WgXcQ")), &prefs).unwrap();

        assert_eq!(req.youtube_url.as_deref(), Some("https://youtu.be/dQw4w9WgXcQ"));
        assert_eq!(req.tone, Some(Tone::Casual));
        assert_eq!(req.provider, Some(Provider::Openrouter));
        assert_eq!(req.model.as_deref(), Some("openai/gpt-4-turbo-preview"));
    }

    #[test]
    fn test_other_provider_uses_its_default_model() {
        let mut a = args(Some("youtube.com/watch?v=dQw4w9WgXcQ"));
        a.provider = Some(Provider::Openai);
        let req = build_request(a, &UserPreferences::default()).unwrap();
        assert_eq!(req.model.as_deref(), Some("gpt-5-nano"));
    }

    #[test]
    fn test_rejects_non_youtube_url() {
        let err = build_request(args(Some("https://vimeo.com/123")), &UserPreferences::default());
        assert!(err.is_err());
    }

    #[test]
    fn test_transcript_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Welcome back to the channel.").unwrap();

        let mut a = args(None);
        a.transcript = Some(file.path().to_path_buf());
        let req = build_request(a, &UserPreferences::default()).unwrap();

        assert!(req.youtube_url.is_none());
        assert_eq!(
            req.transcript.as_deref(),
            Some("Welcome back to the channel.\n")
        );
    }

    #[test]
    fn test_oversized_transcript() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&vec![b'a'; DEFAULT_MAX_TRANSCRIPT_BYTES + 1])
            .unwrap();

        let mut a = args(None);
        a.transcript = Some(file.path().to_path_buf());
        let err = build_request(a, &UserPreferences::default()).unwrap_err();
        assert!(err.to_string().contains("too large"));
    }
}
