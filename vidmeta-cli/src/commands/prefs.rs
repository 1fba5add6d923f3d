//! Preference command handlers
//!
//! Preferences are always saved locally. A copy is also offered to the
//! backend, which only keeps it for paid accounts; a refusal there is not
//! an error.

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use tracing::debug;
use vidmeta_core::domain::preferences::{Provider, Tone, UserPreferences};

use crate::config::Config;

/// Preference subcommands
#[derive(Subcommand)]
pub enum PrefsCommands {
    /// Show saved preferences
    Show,
    /// Change one or more preferences
    Set {
        /// Model provider (openrouter, openai)
        #[arg(long)]
        provider: Option<Provider>,

        /// Default model identifier
        #[arg(long)]
        model: Option<String>,

        /// Default tone (casual, professional, humorous)
        #[arg(long)]
        tone: Option<Tone>,

        /// Origin of the web app using these preferences (empty to clear)
        #[arg(long)]
        web_origin: Option<String>,

        /// Only save locally
        #[arg(long)]
        local_only: bool,
    },
    /// Forget saved preferences
    Reset,
}

/// Handle preference commands
pub async fn handle_prefs_command(command: PrefsCommands, config: &Config) -> Result<()> {
    match command {
        PrefsCommands::Show => {
            show(config);
            Ok(())
        }
        PrefsCommands::Set {
            provider,
            model,
            tone,
            web_origin,
            local_only,
        } => {
            let current = config.preferences().load();
            let updated = apply_changes(current, provider, model, tone, web_origin);
            save(config, &updated, local_only).await
        }
        PrefsCommands::Reset => {
            if config.preferences().reset()? {
                println!("{}", "✓ Preferences reset to defaults".green());
            } else {
                println!("{}", "No saved preferences.".yellow());
            }
            Ok(())
        }
    }
}

fn show(config: &Config) {
    let store = config.preferences();
    let prefs = store.load();

    println!("{}", "Preferences:".bold());
    println!("  Provider:   {}", prefs.provider.to_string().cyan());
    println!("  Model:      {}", prefs.default_model);
    println!("  Tone:       {}", prefs.default_tone);
    if let Some(origin) = &prefs.web_origin {
        println!("  Web origin: {}", origin);
    }
    println!("  {}", format!("({})", store.path().display()).dimmed());
}

/// Merge requested changes into the current preferences
///
/// Switching provider without naming a model resets the model to that
/// provider's default, since model ids are provider specific.
fn apply_changes(
    mut prefs: UserPreferences,
    provider: Option<Provider>,
    model: Option<String>,
    tone: Option<Tone>,
    web_origin: Option<String>,
) -> UserPreferences {
    if let Some(provider) = provider {
        if provider != prefs.provider && model.is_none() {
            prefs.default_model = provider.default_model().to_string();
        }
        prefs.provider = provider;
    }
    if let Some(model) = model {
        prefs.default_model = model;
    }
    if let Some(tone) = tone {
        prefs.default_tone = tone;
    }
    if let Some(origin) = web_origin {
        prefs.web_origin = (!origin.trim().is_empty()).then(|| origin.trim().to_string());
    }
    prefs
}

async fn save(config: &Config, prefs: &UserPreferences, local_only: bool) -> Result<()> {
    config.preferences().save(prefs)?;
    println!("{}", "✓ Preferences saved".green());

    if local_only {
        return Ok(());
    }

    let token = config.token_provider().token().await;
    if token.is_none() {
        return Ok(());
    }

    match config
        .client()
        .save_preferences(prefs, token.as_deref())
        .await
    {
        Ok(()) => println!("{}", "  Synced to your account".dimmed()),
        Err(e) => {
            debug!("Backend did not accept preferences: {}", e);
            println!("{}", "  Account sync not available, kept locally".dimmed());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_switch_resets_model() {
        let prefs = apply_changes(
            UserPreferences::default(),
            Some(Provider::Openai),
            None,
            None,
            None,
        );
        assert_eq!(prefs.provider, Provider::Openai);
        assert_eq!(prefs.default_model, "gpt-5-nano");
    }

    #[test]
    fn test_explicit_model_is_kept() {
        let prefs = apply_changes(
            UserPreferences::default(),
            Some(Provider::Openai),
            Some("gpt-4o-mini".to_string()),
            Some(Tone::Humorous),
            None,
        );
        assert_eq!(prefs.default_model, "gpt-4o-mini");
        assert_eq!(prefs.default_tone, Tone::Humorous);
    }

    #[test]
    fn test_web_origin_set_and_clear() {
        let prefs = apply_changes(
            UserPreferences::default(),
            None,
            None,
            None,
            Some(" https://example.com ".to_string()),
        );
        assert_eq!(prefs.web_origin.as_deref(), Some("https://example.com"));

        let cleared = apply_changes(prefs, None, None, None, Some(String::new()));
        assert!(cleared.web_origin.is_none());
    }
}
