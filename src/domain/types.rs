//! Shared domain types.
//!
//! A `Series` is built once per run and never mutated afterwards; every other
//! type here is derived from it.

use std::collections::BTreeMap;

use chrono::NaiveDate;

/// A single weekly data point (week-ending date, initial claims count).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: f64,
}

impl Observation {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }

    /// Whether the value may be stored in a `Series` (finite and non-negative).
    pub fn is_acceptable(&self) -> bool {
        self.value.is_finite() && self.value >= 0.0
    }
}

/// Observations ordered strictly ascending by date, with unique dates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    observations: Vec<Observation>,
}

impl Series {
    /// Build a series from raw observations in feed order.
    ///
    /// - observations with a non-finite or negative value are discarded
    /// - a repeated date keeps the **last** occurrence (providers re-issue corrections)
    /// - the result is sorted ascending by date
    pub fn from_observations(observations: impl IntoIterator<Item = Observation>) -> Self {
        let by_date: BTreeMap<NaiveDate, f64> = observations
            .into_iter()
            .filter(Observation::is_acceptable)
            .map(|o| (o.date, o.value))
            .collect();

        Self {
            observations: by_date
                .into_iter()
                .map(|(date, value)| Observation { date, value })
                .collect(),
        }
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn latest(&self) -> Option<&Observation> {
        self.observations.last()
    }

    /// The last `n` observations (fewer if the series is shorter).
    pub fn tail(&self, n: usize) -> &[Observation] {
        let start = self.observations.len().saturating_sub(n);
        &self.observations[start..]
    }
}

/// Verdict for the latest observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisResult {
    pub latest_date: NaiveDate,
    pub latest_value: f64,
    /// Mean of the trailing window, which includes the latest observation.
    pub moving_average: f64,
    /// `moving_average * threshold_multiplier`; the latest value must exceed it.
    pub threshold: f64,
    /// Number of observations that actually went into the average.
    pub window_len: usize,
    pub is_anomalous: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLabel {
    Warning,
    Ok,
}

impl StatusLabel {
    pub fn from_anomaly(is_anomalous: bool) -> Self {
        if is_anomalous { Self::Warning } else { Self::Ok }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Warning => "Warning",
            Self::Ok => "OK",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Self::Warning => "\u{26a0}\u{fe0f}",
            Self::Ok => "\u{2705}",
        }
    }
}

impl std::fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Notification payload ready to hand to a `Notifier`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertMessage {
    pub status: StatusLabel,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    #[test]
    fn from_observations_sorts_and_keeps_last_duplicate() {
        let series = Series::from_observations(vec![
            Observation::new(d(15), 230_000.0),
            Observation::new(d(1), 210_000.0),
            Observation::new(d(8), 220_000.0),
            Observation::new(d(1), 215_000.0),
        ]);

        let values: Vec<f64> = series.observations().iter().map(|o| o.value).collect();
        assert_eq!(values, vec![215_000.0, 220_000.0, 230_000.0]);
        assert_eq!(series.observations()[0].date, d(1));
        assert_eq!(series.latest().map(|o| o.date), Some(d(15)));
    }

    #[test]
    fn from_observations_drops_negative_and_non_finite_values() {
        let series = Series::from_observations(vec![
            Observation::new(d(1), -5.0),
            Observation::new(d(8), f64::NAN),
            Observation::new(d(15), f64::INFINITY),
            Observation::new(d(22), 0.0),
        ]);
        assert_eq!(series.len(), 1);
        assert_eq!(series.observations()[0], Observation::new(d(22), 0.0));
    }

    #[test]
    fn tail_is_clamped_to_series_length() {
        let series = Series::from_observations(vec![
            Observation::new(d(1), 1.0),
            Observation::new(d(8), 2.0),
        ]);
        assert_eq!(series.tail(4).len(), 2);
        assert_eq!(series.tail(1)[0].value, 2.0);
        assert!(series.tail(0).is_empty());
    }

    #[test]
    fn status_label_text() {
        assert_eq!(StatusLabel::from_anomaly(true).to_string(), "Warning");
        assert_eq!(StatusLabel::from_anomaly(false).to_string(), "OK");
    }
}
