//! Formatted terminal output.
//!
//! We keep formatting code in one place so the analysis code stays clean and
//! output changes are localized.

use crate::analysis::AnalysisConfig;
use crate::domain::{AlertMessage, AnalysisResult, StatusLabel};
use crate::io::ingest::IngestedSeries;
use crate::notify::DispatchOutcome;

/// Format a count rounded to the nearest integer with `,` thousands separators.
pub fn format_count(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if negative {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format the console report for a completed analysis.
pub fn format_analysis_report(
    series_id: &str,
    ingest: &IngestedSeries,
    result: &AnalysisResult,
    config: &AnalysisConfig,
) -> String {
    let mut out = String::new();

    out.push_str("--- Initial Unemployment Claims Analysis (Seasonally Adjusted) ---\n");
    out.push_str(&format!(
        "Series: {series_id} | observations={} | rows_read={} | dropped={}\n",
        ingest.series.len(),
        ingest.rows_read,
        ingest.row_errors.len()
    ));
    out.push_str(&format!("Latest Data Point: {}\n", result.latest_date.format("%Y-%m-%d")));
    out.push_str(&format!("Initial Claims: {}\n", format_count(result.latest_value)));
    out.push_str(&format!(
        "{}-week moving average: {} (over {} obs)\n",
        config.window_size,
        format_count(result.moving_average),
        result.window_len
    ));
    out.push_str(&format!(
        "Threshold (x{:.2}): {}\n",
        config.threshold_multiplier,
        format_count(result.threshold)
    ));
    let verdict = match StatusLabel::from_anomaly(result.is_anomalous) {
        StatusLabel::Warning => "unusual increase",
        StatusLabel::Ok => "within normal range",
    };
    out.push_str(&format!("Verdict: {verdict}\n"));

    out
}

/// Format the composed message line.
pub fn format_message(message: &AlertMessage) -> String {
    format!("Message: '{}'", message.text)
}

/// Format the dispatch result line.
pub fn format_dispatch(outcome: &DispatchOutcome) -> String {
    if outcome.success {
        "SMS sent successfully.".to_string()
    } else {
        format!("SMS failed to send. Response: {}", outcome.detail)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::{Observation, Series};

    #[test]
    fn count_formatting() {
        assert_eq!(format_count(0.0), "0");
        assert_eq!(format_count(999.0), "999");
        assert_eq!(format_count(1_000.0), "1,000");
        assert_eq!(format_count(215_000.0), "215,000");
        assert_eq!(format_count(1_234_567.4), "1,234,567");
        assert_eq!(format_count(103.75), "104");
        assert_eq!(format_count(-12_345.0), "-12,345");
    }

    #[test]
    fn analysis_report_contains_key_figures() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 7).unwrap();
        let ingest = IngestedSeries {
            series: Series::from_observations([Observation::new(date, 248_000.0)]),
            rows_read: 3,
            row_errors: Vec::new(),
        };
        let result = AnalysisResult {
            latest_date: date,
            latest_value: 248_000.0,
            moving_average: 240_250.0,
            threshold: 276_287.5,
            window_len: 4,
            is_anomalous: false,
        };

        let report = format_analysis_report("ICSA", &ingest, &result, &AnalysisConfig::default());
        assert!(report.contains("Latest Data Point: 2025-06-07"));
        assert!(report.contains("Initial Claims: 248,000"));
        assert!(report.contains("4-week moving average: 240,250"));
        assert!(report.contains("Threshold (x1.15): 276,288"));
        assert!(report.contains("Verdict: within normal range"));
    }

    #[test]
    fn dispatch_failure_shows_detail() {
        let line = format_dispatch(&DispatchOutcome::failure("invalid_dst"));
        assert_eq!(line, "SMS failed to send. Response: invalid_dst");
    }
}
