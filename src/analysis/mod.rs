//! Spike detection on the latest observation.
//!
//! The rule is deliberately simple:
//!
//! ```text
//! window    = last `window_size` observations, latest included
//! average   = mean(window)
//! anomalous = latest > average * threshold_multiplier
//! ```
//!
//! Notes:
//! - The window contains the point being tested, so a spike also lifts its
//!   own baseline. A strictly-prior window would flag more weeks.
//! - A series shorter than the window is averaged over what is available
//!   (so a single observation is never anomalous: `x > x * 1.15` is false
//!   for non-negative `x`).
//! - The comparison is strict; a value exactly at the threshold is normal.

use thiserror::Error;

use crate::domain::{AnalysisResult, Series};

pub const DEFAULT_WINDOW: usize = 4;
pub const DEFAULT_THRESHOLD: f64 = 1.15;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("series has no observations")]
    InsufficientData,
    #[error("moving-average window must be >= 1")]
    InvalidWindow,
}

/// Window and threshold for the spike rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisConfig {
    pub window_size: usize,
    pub threshold_multiplier: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW,
            threshold_multiplier: DEFAULT_THRESHOLD,
        }
    }
}

impl AnalysisConfig {
    /// Reject settings that would make the verdict meaningless.
    pub fn validate(&self) -> Result<(), String> {
        if self.window_size == 0 {
            return Err("Window size must be >= 1.".to_string());
        }
        if !(self.threshold_multiplier.is_finite() && self.threshold_multiplier > 0.0) {
            return Err(format!(
                "Threshold multiplier must be finite and > 0 (got {}).",
                self.threshold_multiplier
            ));
        }
        Ok(())
    }
}

/// Apply the spike rule to the most recent observation of `series`.
pub fn analyze(series: &Series, config: &AnalysisConfig) -> Result<AnalysisResult, AnalysisError> {
    if config.window_size == 0 {
        return Err(AnalysisError::InvalidWindow);
    }
    let latest = *series.latest().ok_or(AnalysisError::InsufficientData)?;

    let window = series.tail(config.window_size);
    let moving_average = mean(window.iter().map(|o| o.value));
    let threshold = moving_average * config.threshold_multiplier;

    Ok(AnalysisResult {
        latest_date: latest.date,
        latest_value: latest.value,
        moving_average,
        threshold,
        window_len: window.len(),
        is_anomalous: latest.value > threshold,
    })
}

fn mean(values: impl ExactSizeIterator<Item = f64>) -> f64 {
    let n = values.len();
    values.sum::<f64>() / n as f64
}
