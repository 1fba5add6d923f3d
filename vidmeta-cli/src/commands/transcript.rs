//! Transcript command handlers

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;

/// Transcript subcommands
#[derive(Subcommand)]
pub enum TranscriptCommands {
    /// Upload a transcript file (.txt, .srt, .vtt) and print the extracted text
    Upload {
        /// Path to the transcript file
        file: PathBuf,
    },
}

/// Handle transcript commands
pub async fn handle_transcript_command(command: TranscriptCommands, config: &Config) -> Result<()> {
    match command {
        TranscriptCommands::Upload { file } => upload(config, &file).await,
    }
}

async fn upload(config: &Config, file: &Path) -> Result<()> {
    let contents = fs::read(file).with_context(|| format!("Failed to read {:?}", file))?;
    let file_name = file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "transcript.txt".to_string());

    let token = config.token_provider().token().await;
    let uploaded = config
        .client()
        .upload_transcript(&file_name, contents, token.as_deref())
        .await
        .context("Failed to upload transcript")?;

    println!("{}", format!("✓ Extracted transcript from {}", file_name).green());
    println!("{}", "─".repeat(60).dimmed());
    println!("{}", uploaded.transcript);

    Ok(())
}
