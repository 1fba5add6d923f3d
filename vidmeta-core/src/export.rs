//! Export of generated outputs
//!
//! Renders [`JobOutputs`] as a Markdown document, as JSON, or as plain text
//! for a single section. Empty sections are left out of the document.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::str::FromStr;

use crate::domain::job::JobOutputs;

/// One part of the generated metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Description,
    Tags,
    Summary,
    SocialCaption,
    Hashtags,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Description,
        Section::Tags,
        Section::Summary,
        Section::SocialCaption,
        Section::Hashtags,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Section::Description => "Description",
            Section::Tags => "Tags",
            Section::Summary => "Summary",
            Section::SocialCaption => "Social Caption",
            Section::Hashtags => "Hashtags",
        }
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "description" => Ok(Section::Description),
            "tags" => Ok(Section::Tags),
            "summary" => Ok(Section::Summary),
            "social_caption" | "caption" => Ok(Section::SocialCaption),
            "hashtags" => Ok(Section::Hashtags),
            other => Err(format!("unknown section '{}'", other)),
        }
    }
}

/// Plain text of a single section, in the form it is usually pasted
///
/// Tags are comma separated, summary bullets one per line and hashtags
/// space separated with a leading `#`. Returns `None` if the section is empty.
pub fn section_text(outputs: &JobOutputs, section: Section) -> Option<String> {
    let text = match section {
        Section::Description => outputs.description.trim().to_string(),
        Section::Tags => outputs.tags.join(", "),
        Section::Summary => outputs.summary.join("\n"),
        Section::SocialCaption => outputs.social_caption.trim().to_string(),
        Section::Hashtags => outputs
            .hashtags
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|h| format!("#{}", h.trim_start_matches('#')))
            .collect::<Vec<_>>()
            .join(" "),
    };
    (!text.is_empty()).then_some(text)
}

/// Render the whole result as a Markdown document
pub fn to_markdown(outputs: &JobOutputs) -> String {
    let mut doc = String::new();

    for section in Section::ALL {
        let Some(text) = section_text(outputs, section) else {
            continue;
        };

        if !doc.is_empty() {
            doc.push('\n');
        }
        let _ = writeln!(doc, "## {}\n", section.title());

        match section {
            Section::Summary => {
                for bullet in &outputs.summary {
                    let _ = writeln!(doc, "- {}", bullet);
                }
            }
            Section::Tags => {
                let tags: Vec<String> = outputs.tags.iter().map(|t| format!("`{}`", t)).collect();
                let _ = writeln!(doc, "{}", tags.join(", "));
            }
            _ => {
                let _ = writeln!(doc, "{}", text);
            }
        }
    }

    doc
}

/// Render the whole result as pretty-printed JSON
pub fn to_json(outputs: &JobOutputs) -> serde_json::Result<String> {
    serde_json::to_string_pretty(outputs)
}
