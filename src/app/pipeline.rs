//! The single-pass watchdog run.
//!
//! fetch -> parse -> analyze -> compose -> dispatch
//!
//! Only a failed fetch is fatal. A parse or analysis failure, incomplete
//! credentials or a dry run end the run early as `RunOutcome::Skipped`; a failed send still
//! ends as `RunOutcome::Done` with the failure recorded in the outcome.

use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::analysis::{AnalysisConfig, AnalysisError, analyze};
use crate::config::{CredentialSet, NotificationCredentials};
use crate::data::{FeedSource, FetchError};
use crate::domain::{AlertMessage, AnalysisResult};
use crate::io::ingest::{IngestedSeries, ParseError, SeriesParser};
use crate::notify::{DispatchOutcome, Notifier};
use crate::report::compose;

/// States a run passes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetching,
    Parsing,
    Analyzing,
    Composing,
    Dispatching,
    Done,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Fetching => "fetching",
            Self::Parsing => "parsing",
            Self::Analyzing => "analyzing",
            Self::Composing => "composing",
            Self::Dispatching => "dispatching",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// Why a run stopped before dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Parse(ParseError),
    Analysis(AnalysisError),
    CredentialsIncomplete { missing: Vec<&'static str> },
    DryRun,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "could not process feed: {e}"),
            Self::Analysis(e) => write!(f, "could not analyze series: {e}"),
            Self::CredentialsIncomplete { missing } => {
                write!(f, "SMS credentials not set ({})", missing.join(", "))
            }
            Self::DryRun => f.write_str("dry run"),
        }
    }
}

/// How a non-fatal run ended.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    Done {
        ingest: IngestedSeries,
        analysis: AnalysisResult,
        message: AlertMessage,
        dispatch: DispatchOutcome,
    },
    Skipped {
        stage: Stage,
        reason: SkipReason,
        ingest: Option<IngestedSeries>,
        analysis: Option<AnalysisResult>,
        message: Option<AlertMessage>,
    },
}

impl RunOutcome {
    pub fn stage(&self) -> Stage {
        match self {
            Self::Done { .. } => Stage::Done,
            Self::Skipped { stage, .. } => *stage,
        }
    }

    pub fn message(&self) -> Option<&AlertMessage> {
        match self {
            Self::Done { message, .. } => Some(message),
            Self::Skipped { message, .. } => message.as_ref(),
        }
    }
}

/// Per-run settings, built once from the CLI.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub series_id: String,
    pub analysis: AnalysisConfig,
    pub save: Option<PathBuf>,
    pub dry_run: bool,
}

/// Sequences one run over a feed source and an optional notifier.
pub struct Orchestrator<S> {
    source: S,
    credentials: CredentialSet,
    settings: RunSettings,
}

impl<S: FeedSource> Orchestrator<S> {
    pub fn new(source: S, credentials: CredentialSet, settings: RunSettings) -> Self {
        Self {
            source,
            credentials,
            settings,
        }
    }

    /// Execute one run. `connect` builds the notifier once credentials are known
    /// to be complete; it is never called otherwise.
    pub fn run<N, F>(&self, connect: F) -> Result<RunOutcome, FetchError>
    where
        N: Notifier,
        F: FnOnce(&NotificationCredentials) -> N,
    {
        // 1) Fetch. The only fatal stage.
        info!(stage = %Stage::Fetching, source = %self.source.describe(), "Downloading feed");
        let raw = self.source.fetch()?;
        info!(bytes = raw.len(), "Download successful");

        if let Some(path) = &self.settings.save {
            match crate::io::write_feed_snapshot(path, &raw) {
                Ok(()) => debug!(path = %path.display(), "Saved feed snapshot"),
                Err(e) => warn!(error = %e, "Could not save feed snapshot"),
            }
        }

        // 2) Parse.
        let parser = SeriesParser::new(&self.settings.series_id);
        let ingest = match parser.parse_with_report(&raw) {
            Ok(ingest) => ingest,
            Err(e) => {
                warn!(stage = %Stage::Parsing, error = %e, "Skipping analysis");
                return Ok(RunOutcome::Skipped {
                    stage: Stage::Parsing,
                    reason: SkipReason::Parse(e),
                    ingest: None,
                    analysis: None,
                    message: None,
                });
            }
        };
        for row in &ingest.row_errors {
            debug!(line = row.line, reason = %row.message, "Dropped row");
        }
        info!(
            observations = ingest.series.len(),
            rows_read = ingest.rows_read,
            dropped = ingest.row_errors.len(),
            "Parsed feed"
        );

        // 3) Analyze.
        let analysis = match analyze(&ingest.series, &self.settings.analysis) {
            Ok(analysis) => analysis,
            Err(e) => {
                warn!(stage = %Stage::Analyzing, error = %e, "Skipping notification");
                return Ok(RunOutcome::Skipped {
                    stage: Stage::Analyzing,
                    reason: SkipReason::Analysis(e),
                    ingest: Some(ingest),
                    analysis: None,
                    message: None,
                });
            }
        };
        info!(
            stage = %Stage::Analyzing,
            date = %analysis.latest_date,
            value = analysis.latest_value,
            moving_average = analysis.moving_average,
            anomalous = analysis.is_anomalous,
            "Analyzed latest observation"
        );

        // 4) Compose.
        let message = compose(&analysis);

        if self.settings.dry_run {
            info!(stage = %Stage::Composing, "Dry run; not sending");
            return Ok(RunOutcome::Skipped {
                stage: Stage::Composing,
                reason: SkipReason::DryRun,
                ingest: Some(ingest),
                analysis: Some(analysis),
                message: Some(message),
            });
        }

        let Some(credentials) = self.credentials.complete() else {
            let missing = self.credentials.missing();
            info!(stage = %Stage::Composing, missing = ?missing, "SMS credentials incomplete; skipping notification");
            return Ok(RunOutcome::Skipped {
                stage: Stage::Composing,
                reason: SkipReason::CredentialsIncomplete { missing },
                ingest: Some(ingest),
                analysis: Some(analysis),
                message: Some(message),
            });
        };

        // 5) Dispatch. Failure is reported, never fatal.
        let notifier = connect(&credentials);
        info!(stage = %Stage::Dispatching, channel = notifier.name(), "Sending SMS");
        let dispatch = notifier.send(&credentials.origin, &credentials.destination, &message.text);
        if dispatch.success {
            info!(channel = notifier.name(), "SMS sent");
        } else {
            warn!(channel = notifier.name(), detail = %dispatch.detail, "SMS failed to send");
        }

        Ok(RunOutcome::Done {
            ingest,
            analysis,
            message,
            dispatch,
        })
    }
}
