//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod generate;
mod job;
mod prefs;
mod transcript;
mod usage;

pub use generate::GenerateArgs;
pub use job::JobCommands;
pub use prefs::PrefsCommands;
pub use transcript::TranscriptCommands;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Generate metadata for a YouTube video and wait for the result
    Generate(GenerateArgs),
    /// Job inspection, watching and export
    Job {
        #[command(subcommand)]
        command: JobCommands,
    },
    /// Show account usage
    Usage,
    /// Local generation preferences
    Prefs {
        #[command(subcommand)]
        command: PrefsCommands,
    },
    /// Transcript utilities
    Transcript {
        #[command(subcommand)]
        command: TranscriptCommands,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Generate(args) => generate::handle_generate(args, config).await,
        Commands::Job { command } => job::handle_job_command(command, config).await,
        Commands::Usage => usage::show_usage(config).await,
        Commands::Prefs { command } => prefs::handle_prefs_command(command, config).await,
        Commands::Transcript { command } => {
            transcript::handle_transcript_command(command, config).await
        }
    }
}
