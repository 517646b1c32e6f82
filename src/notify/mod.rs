//! Outbound notification channels.
//!
//! A `Notifier` never returns an error: transport and remote-API failures are
//! folded into a `DispatchOutcome` so the caller can report them and move on.

pub mod voipms;

pub use voipms::VoipMsClient;

/// Result of a single send attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub success: bool,
    pub detail: String,
}

impl DispatchOutcome {
    pub fn success(detail: impl Into<String>) -> Self {
        Self {
            success: true,
            detail: detail.into(),
        }
    }

    pub fn failure(detail: impl Into<String>) -> Self {
        Self {
            success: false,
            detail: detail.into(),
        }
    }
}

/// Trait for SMS delivery channels.
pub trait Notifier {
    /// Channel name
    fn name(&self) -> &str;

    /// Send `text` from `origin` to `destination`.
    fn send(&self, origin: &str, destination: &str, text: &str) -> DispatchOutcome;
}
