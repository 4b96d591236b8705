//! Keypoint job worker binary.
//!
//! Usage: `jumpcoach-worker <job.json>...`
//!
//! Each job's status record is printed to stdout as one JSON line. The
//! process exits non-zero when any job failed.

use std::path::PathBuf;

use anyhow::{bail, Context};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use jumpcoach_worker::{JobProcessor, JobStatus, JsonFileSource, WorkerConfig};

fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    init_tracing()?;

    let config = WorkerConfig::from_env().context("Failed to load worker configuration")?;
    info!("Worker config: {:?}", config);

    let jobs: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    if jobs.is_empty() {
        bail!("usage: jumpcoach-worker <job.json>...");
    }

    let processor = JobProcessor::new(config).context("Failed to create job processor")?;

    let mut failed = 0usize;
    for path in &jobs {
        let record = processor.process(&JsonFileSource::new(path));
        if record.status == JobStatus::Failed {
            failed += 1;
        }
        println!("{}", serde_json::to_string(&record)?);
    }

    info!(total = jobs.len(), failed, "Worker finished");
    if failed > 0 {
        bail!("{failed} of {} jobs failed", jobs.len());
    }
    Ok(())
}

/// Colored output for dev, JSON for production.
fn init_tracing() -> anyhow::Result<()> {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("jumpcoach_worker=info".parse()?)
        .add_directive("jumpcoach_analysis=info".parse()?);

    // Logs go to stderr so stdout carries only job records.
    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(true)
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }
    Ok(())
}
