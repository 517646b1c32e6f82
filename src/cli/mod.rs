//! Command-line parsing for the initial-claims watchdog.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! parse/analyze/notify pipeline.

use std::path::PathBuf;

use clap::Parser;

use crate::analysis::{AnalysisConfig, DEFAULT_THRESHOLD, DEFAULT_WINDOW};
use crate::data::SERIES_INITIAL_CLAIMS;

/// Top-level CLI.
#[derive(Debug, Parser, Clone)]
#[command(
    name = "claims-watch",
    version,
    about = "Weekly initial-claims spike check with SMS alerting (FRED-based)"
)]
pub struct Cli {
    /// FRED series id; the feed header must read `observation_date,<ID>`.
    #[arg(long, default_value = SERIES_INITIAL_CLAIMS)]
    pub series_id: String,

    /// Override the download URL (defaults to the FRED graph CSV for the series).
    #[arg(long, conflicts_with = "input")]
    pub url: Option<String>,

    /// Read the feed from a local CSV instead of downloading it.
    #[arg(long, value_name = "CSV")]
    pub input: Option<PathBuf>,

    /// Save the raw feed to this path before parsing.
    #[arg(long, value_name = "CSV")]
    pub save: Option<PathBuf>,

    /// Moving-average window (observations, latest included).
    #[arg(short = 'w', long, default_value_t = DEFAULT_WINDOW)]
    pub window: usize,

    /// Spike threshold as a multiple of the moving average.
    #[arg(short = 't', long, default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: f64,

    /// Compose and print the message but never send it.
    #[arg(long)]
    pub dry_run: bool,

    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Cli {
    pub fn analysis_config(&self) -> AnalysisConfig {
        AnalysisConfig {
            window_size: self.window,
            threshold_multiplier: self.threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_weekly_claims_rule() {
        let cli = Cli::parse_from(["claims-watch"]);
        assert_eq!(cli.series_id, "ICSA");
        assert_eq!(cli.analysis_config(), AnalysisConfig::default());
        assert!(!cli.dry_run);
        assert!(cli.input.is_none());
    }

    #[test]
    fn overrides_are_parsed() {
        let cli = Cli::parse_from([
            "claims-watch",
            "--input",
            "ICSA.csv",
            "-w",
            "8",
            "-t",
            "1.3",
            "--dry-run",
        ]);
        assert_eq!(cli.input, Some(PathBuf::from("ICSA.csv")));
        assert_eq!(cli.window, 8);
        assert_eq!(cli.threshold, 1.3);
        assert!(cli.dry_run);
    }

    #[test]
    fn url_and_input_conflict() {
        let res = Cli::try_parse_from(["claims-watch", "--input", "a.csv", "--url", "http://x"]);
        assert!(res.is_err());
    }
}
