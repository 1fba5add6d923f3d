//! Job command handlers
//!
//! Handles all job-related CLI commands including listing,
//! viewing details, watching until completion, and exporting results.

use anyhow::{Context, Result, bail};
use clap::{Subcommand, ValueEnum};
use colored::*;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use vidmeta_core::domain::job::{JobOutputs, JobRecord, JobStatus};
use vidmeta_core::export::{Section, section_text, to_json, to_markdown};
use vidmeta_core::validation::is_valid_job_id;
use vidmeta_poller::{JobPoller, PollState};

use crate::config::Config;
use crate::render::{print_job_details, print_job_summary, print_outputs, print_poll_update};

/// Job subcommands
#[derive(Subcommand)]
pub enum JobCommands {
    /// List recent jobs
    List,
    /// Get job details
    Get {
        /// Job ID
        id: String,
    },
    /// Poll a job until it finishes
    Watch {
        /// Job ID
        id: String,
    },
    /// Export the generated metadata of a finished job
    Export {
        /// Job ID
        id: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Markdown)]
        format: ExportFormat,

        /// Only export one section (description, tags, summary, caption, hashtags)
        #[arg(short, long)]
        section: Option<Section>,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Markdown,
    Text,
    Json,
}

/// Handle job commands
///
/// Routes job subcommands to their respective handlers.
///
/// # Arguments
/// * `command` - The job command to execute
/// * `config` - The CLI configuration
pub async fn handle_job_command(command: JobCommands, config: &Config) -> Result<()> {
    match command {
        JobCommands::List => list_jobs(config).await,
        JobCommands::Get { id } => get_job(config, &id).await,
        JobCommands::Watch { id } => watch_job(config, &id).await,
        JobCommands::Export {
            id,
            format,
            section,
            output,
        } => export_job(config, &id, format, section, output).await,
    }
}

/// List recent jobs
async fn list_jobs(config: &Config) -> Result<()> {
    let token = config.token_provider().token().await;
    let jobs = config
        .client()
        .list_recent_jobs(token.as_deref())
        .await
        .context("Failed to list jobs")?;

    if jobs.is_empty() {
        println!("{}", "No jobs found.".yellow());
    } else {
        println!("{}", format!("Found {} job(s):", jobs.len()).bold());
        println!();
        for job in jobs {
            print_job_summary(&job);
        }
    }

    Ok(())
}

/// Get and display a single job
async fn get_job(config: &Config, id: &str) -> Result<()> {
    let job = fetch_job(config, id).await?;
    print_job_details(&job);
    Ok(())
}

async fn fetch_job(config: &Config, id: &str) -> Result<JobRecord> {
    ensure_job_id(id)?;
    let token = config.token_provider().token().await;
    config
        .client()
        .get_job(id, token.as_deref())
        .await
        .with_context(|| format!("Failed to fetch job {}", id))
}

fn ensure_job_id(id: &str) -> Result<()> {
    if !is_valid_job_id(id) {
        bail!("'{}' is not a valid job id", id);
    }
    Ok(())
}

/// Poll a job until it settles, printing each fetch
///
/// Ctrl-C stops the watch without touching the job itself.
pub(crate) async fn watch_job(config: &Config, id: &str) -> Result<()> {
    ensure_job_id(id)?;

    let mut poller = JobPoller::new(
        config.poll.clone(),
        Arc::new(config.client()),
        config.token_provider(),
    );
    poller.start(id);

    println!(
        "{} {} {}",
        "Watching job".bold(),
        id.cyan(),
        "(Ctrl-C to stop)".dimmed()
    );

    let mut rx = poller.subscribe();
    let mut seen_attempts = 0;

    let last = loop {
        let state = rx.borrow_and_update().clone();
        if state.attempts != seen_attempts {
            seen_attempts = state.attempts;
            print_poll_update(&state);
        }
        if !state.polling {
            break state;
        }

        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break poller.state();
                }
            }
            _ = tokio::signal::ctrl_c() => {
                poller.cancel();
                println!();
                println!("{}", "Stopped watching. The job keeps running on the backend.".yellow());
                println!("{}", format!("  Resume with: vidmeta job watch {}", id).dimmed());
                return Ok(());
            }
        }
    };

    finish_watch(&last)
}

/// Report how a watch ended
fn finish_watch(state: &PollState) -> Result<()> {
    if state.gave_up() {
        let error = state
            .error
            .as_ref()
            .map(|e| e.to_string())
            .unwrap_or_default();
        bail!(
            "Stopped polling after {} attempt(s): {}",
            state.attempts,
            error
        );
    }

    let Some(job) = &state.job else {
        bail!("Job finished without a record");
    };

    println!();
    if job.status == JobStatus::Failed {
        bail!(
            "Job failed: {}",
            job.error.as_deref().unwrap_or("no error message")
        );
    }

    match &job.result {
        Some(outputs) if !outputs.is_empty() => {
            println!("{}", "✓ Metadata ready".green().bold());
            println!();
            print_outputs(outputs);
        }
        _ => println!(
            "{}",
            format!("Job finished with status {} but no metadata", job.status).yellow()
        ),
    }

    Ok(())
}

/// Export the result of a finished job
async fn export_job(
    config: &Config,
    id: &str,
    format: ExportFormat,
    section: Option<Section>,
    output: Option<PathBuf>,
) -> Result<()> {
    let job = fetch_job(config, id).await?;

    let Some(outputs) = job.result.as_ref().filter(|o| !o.is_empty()) else {
        bail!("Job {} has no metadata yet (status: {})", id, job.status);
    };

    let document = render_export(outputs, format, section)?;

    match output {
        Some(path) => {
            fs::write(&path, &document)
                .with_context(|| format!("Failed to write {:?}", path))?;
            println!("{}", format!("✓ Exported to {}", path.display()).green());
        }
        None => print!("{}", document),
    }

    Ok(())
}

fn render_export(
    outputs: &JobOutputs,
    format: ExportFormat,
    section: Option<Section>,
) -> Result<String> {
    if let Some(section) = section {
        let text = section_text(outputs, section)
            .with_context(|| format!("Section '{}' is empty", section.title()))?;
        return Ok(match format {
            ExportFormat::Json => format!("{}\n", serde_json::to_string_pretty(&text)?),
            ExportFormat::Markdown => format!("## {}\n\n{}\n", section.title(), text),
            ExportFormat::Text => format!("{}\n", text),
        });
    }

    Ok(match format {
        ExportFormat::Markdown => to_markdown(outputs),
        ExportFormat::Json => format!("{}\n", to_json(outputs)?),
        ExportFormat::Text => {
            let mut doc = String::new();
            for section in Section::ALL {
                if let Some(text) = section_text(outputs, section) {
                    if !doc.is_empty() {
                        doc.push('\n');
                    }
                    doc.push_str(&format!("{}:\n{}\n", section.title(), text));
                }
            }
            doc
        }
    })
}
