//! Terminal rendering of jobs and generated metadata

use colored::*;
use vidmeta_core::domain::job::{JobOutputs, JobRecord, JobStatus};
use vidmeta_core::export::{Section, section_text};
use vidmeta_poller::PollState;

/// Print a one-entry summary of a job, as used in listings
pub fn print_job_summary(job: &JobRecord) {
    println!(
        "  {} {} Job {}",
        status_icon(&job.status),
        colorize_status(&job.status),
        job.id.dimmed()
    );
    println!(
        "    Video:   {}",
        truncate(job.video_url.as_deref().unwrap_or("No URL"), 40)
    );
    if let Some(created) = job.created_at {
        println!(
            "    Created: {}",
            created.format("%Y-%m-%d %H:%M:%S").to_string().dimmed()
        );
    }
    println!();
}

/// Print detailed job information
pub fn print_job_details(job: &JobRecord) {
    println!("{}", "Job Details:".bold());
    println!("  ID:        {}", job.id.cyan());
    println!("  Status:    {}", colorize_status(&job.status));

    if let Some(url) = &job.video_url {
        println!("  Video:     {}", url);
    }
    if let Some(created) = job.created_at {
        println!("  Created:   {}", created.format("%Y-%m-%d %H:%M:%S"));
    }
    if let Some(updated) = job.updated_at {
        println!("  Updated:   {}", updated.format("%Y-%m-%d %H:%M:%S"));

        if let Some(created) = job.created_at {
            let seconds = updated.signed_duration_since(created).num_seconds();
            println!("  Elapsed:   {}s", seconds);
        }
    }

    if let Some(error) = &job.error {
        println!("\n{}", "Error:".bold());
        println!("{}", error.red());
    }

    match &job.result {
        Some(outputs) if !outputs.is_empty() => {
            println!();
            print_outputs(outputs);
        }
        _ => {}
    }
}

/// Print every non-empty section of the generated metadata
pub fn print_outputs(outputs: &JobOutputs) {
    let mut first = true;
    for section in Section::ALL {
        let Some(text) = section_text(outputs, section) else {
            continue;
        };

        if !first {
            println!();
        }
        first = false;

        println!("{}", section.title().bold());
        println!("{}", "─".repeat(60).dimmed());
        match section {
            Section::Summary => {
                for bullet in &outputs.summary {
                    println!("  {} {}", "•".cyan(), bullet);
                }
            }
            _ => println!("{}", text),
        }
    }
}

/// Print one line describing the latest poll attempt
pub fn print_poll_update(state: &PollState) {
    let prefix = format!("[{:>2}]", state.attempts).dimmed();

    if let Some(error) = &state.error {
        println!(
            "{} {} {} ({} consecutive)",
            prefix,
            "error:".red(),
            error,
            state.consecutive_errors
        );
    } else if let Some(job) = &state.job {
        print!(
            "{} {} {}",
            prefix,
            status_icon(&job.status),
            colorize_status(&job.status)
        );
        match state.next_delay {
            Some(delay) if state.polling => {
                println!(
                    "{}",
                    format!(" · next check in {:.1}s", delay.as_secs_f64()).dimmed()
                )
            }
            _ => println!(),
        }
    }
}

/// Colorize job status for display
pub fn colorize_status(status: &JobStatus) -> ColoredString {
    let status_str = status.to_string();
    match status {
        JobStatus::Pending => status_str.yellow(),
        JobStatus::Processing => status_str.cyan(),
        JobStatus::Completed | JobStatus::Done => status_str.green(),
        JobStatus::Failed => status_str.red(),
        JobStatus::Unknown(_) => status_str.dimmed(),
    }
}

fn status_icon(status: &JobStatus) -> ColoredString {
    match status {
        JobStatus::Completed | JobStatus::Done => "✓".green(),
        JobStatus::Failed => "✗".red(),
        JobStatus::Processing => "↻".cyan(),
        _ => "…".dimmed(),
    }
}

/// Shorten `text` to at most `max` characters, ending with "..."
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("https://youtu.be/dQw4w9WgXcQ", 40), "https://youtu.be/dQw4w9WgXcQ");

        let long = "https://www.youtube.com/watch?v=dQw4w9WgXcQ&list=PLrAXtmRdnEQy";
        let short = truncate(long, 40);
        assert_eq!(short.chars().count(), 40);
        assert!(short.ends_with("..."));
        assert!(long.starts_with(short.trim_end_matches("...")));
    }
}
