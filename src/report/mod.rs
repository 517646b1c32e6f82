//! Alert composition and formatted terminal output.

pub mod format;

pub use format::*;

use crate::domain::{AlertMessage, AnalysisResult, StatusLabel};

/// Longest text that fits a single UCS-2 SMS segment.
pub const SMS_SEGMENT_CHARS: usize = 70;

/// Turn a verdict into the SMS payload.
pub fn compose(result: &AnalysisResult) -> AlertMessage {
    let status = StatusLabel::from_anomaly(result.is_anomalous);
    let text = format!(
        "Jobs Alert {} {}: Initial claims at {}.",
        status.emoji(),
        status,
        format_count(result.latest_value)
    );
    AlertMessage { status, text }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn result(latest_value: f64, is_anomalous: bool) -> AnalysisResult {
        AnalysisResult {
            latest_date: NaiveDate::from_ymd_opt(2025, 6, 7).unwrap(),
            latest_value,
            moving_average: 240_000.0,
            threshold: 276_000.0,
            window_len: 4,
            is_anomalous,
        }
    }

    #[test]
    fn warning_message() {
        let msg = compose(&result(301_000.0, true));
        assert_eq!(msg.status, StatusLabel::Warning);
        assert_eq!(msg.text, "Jobs Alert \u{26a0}\u{fe0f} Warning: Initial claims at 301,000.");
    }

    #[test]
    fn ok_message_rounds_value() {
        let msg = compose(&result(238_749.6, false));
        assert_eq!(msg.status, StatusLabel::Ok);
        assert_eq!(msg.text, "Jobs Alert \u{2705} OK: Initial claims at 238,750.");
    }

    #[test]
    fn text_fits_one_segment_even_for_huge_values() {
        let msg = compose(&result(1.0e15, true));
        assert!(msg.text.chars().count() <= SMS_SEGMENT_CHARS, "{}", msg.text);
    }
}
