//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and sets up logging
//! - picks the feed source (FRED download or local file)
//! - loads SMS credentials from the environment
//! - runs the pipeline and prints the console report

use clap::Parser;
use tracing::error;

use crate::cli::Cli;
use crate::config::CredentialSet;
use crate::data::{FeedSource, FileSource, FredCsvSource};
use crate::error::AppError;
use crate::notify::VoipMsClient;
use crate::report::{format_analysis_report, format_dispatch, format_message};

pub mod pipeline;

use pipeline::{Orchestrator, RunOutcome, RunSettings, SkipReason};

/// Entry point for the `claims-watch` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    crate::logging::init(&cli.log_level)?;

    let settings = settings_from_cli(&cli)?;
    let credentials = CredentialSet::from_env();

    let outcome = match (&cli.input, &cli.url) {
        (Some(path), _) => run_with(FileSource::new(path), credentials, settings.clone()),
        (None, Some(url)) => run_with(FredCsvSource::new(url.clone()), credentials, settings.clone()),
        (None, None) => run_with(
            FredCsvSource::for_series(&settings.series_id),
            credentials,
            settings.clone(),
        ),
    };

    let outcome = outcome.inspect_err(|e| error!(error = %e, "Run aborted"))?;
    println!("{}", format_outcome(&outcome, &settings));
    Ok(())
}

fn run_with<S: FeedSource>(
    source: S,
    credentials: CredentialSet,
    settings: RunSettings,
) -> Result<RunOutcome, AppError> {
    let orchestrator = Orchestrator::new(source, credentials, settings);
    Ok(orchestrator.run(VoipMsClient::new)?)
}

pub fn settings_from_cli(cli: &Cli) -> Result<RunSettings, AppError> {
    let analysis = cli.analysis_config();
    analysis.validate().map_err(AppError::config)?;

    if cli.series_id.trim().is_empty() {
        return Err(AppError::config("Series id must not be empty."));
    }

    Ok(RunSettings {
        series_id: cli.series_id.trim().to_string(),
        analysis,
        save: cli.save.clone(),
        dry_run: cli.dry_run,
    })
}

/// Console report for a finished (non-fatal) run.
pub fn format_outcome(outcome: &RunOutcome, settings: &RunSettings) -> String {
    let mut out = String::new();

    match outcome {
        RunOutcome::Done {
            ingest,
            analysis,
            message,
            dispatch,
        } => {
            out.push_str(&format_analysis_report(&settings.series_id, ingest, analysis, &settings.analysis));
            out.push('\n');
            out.push_str(&format_message(message));
            out.push('\n');
            out.push_str(&format_dispatch(dispatch));
        }
        RunOutcome::Skipped {
            reason: SkipReason::Parse(e),
            ..
        } => {
            out.push_str(&format!("An error occurred while processing the data: {e}"));
        }
        RunOutcome::Skipped {
            reason,
            ingest,
            analysis,
            message,
            ..
        } => {
            if let (Some(ingest), Some(analysis)) = (ingest, analysis) {
                out.push_str(&format_analysis_report(&settings.series_id, ingest, analysis, &settings.analysis));
                out.push('\n');
            }
            if let Some(message) = message {
                out.push_str(&format_message(message));
                out.push('\n');
            }
            match reason {
                SkipReason::DryRun => out.push_str("Dry run: notification not sent."),
                other => out.push_str(&format!("{other}. Skipping notification.")),
            }
        }
    }

    out
}
