//! User preference types
//!
//! Preferences are kept locally by the front end and optionally mirrored
//! to the backend. Every field falls back to its default when missing so
//! that older or partially written preference files still load.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Model provider used for generation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    Openrouter,
    Openai,
}

impl Provider {
    /// Model used when the user has not picked one for this provider
    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::Openrouter => "openai/gpt-4-turbo-preview",
            Provider::Openai => "gpt-5-nano",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Openrouter => f.write_str("openrouter"),
            Provider::Openai => f.write_str("openai"),
        }
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "openrouter" => Ok(Provider::Openrouter),
            "openai" => Ok(Provider::Openai),
            other => Err(format!("unknown provider '{}'", other)),
        }
    }
}

/// Writing tone requested for generated text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Casual,
    #[default]
    Professional,
    Humorous,
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tone::Casual => f.write_str("casual"),
            Tone::Professional => f.write_str("professional"),
            Tone::Humorous => f.write_str("humorous"),
        }
    }
}

impl FromStr for Tone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "casual" => Ok(Tone::Casual),
            "professional" => Ok(Tone::Professional),
            "humorous" => Ok(Tone::Humorous),
            other => Err(format!("unknown tone '{}'", other)),
        }
    }
}

/// Saved generation defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    #[serde(default)]
    pub provider: Provider,
    #[serde(default = "default_model")]
    pub default_model: String,
    #[serde(default)]
    pub default_tone: Tone,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_origin: Option<String>,
}

fn default_model() -> String {
    Provider::default().default_model().to_string()
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            default_model: default_model(),
            default_tone: Tone::default(),
            web_origin: None,
        }
    }
}
