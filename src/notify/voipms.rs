//! VoIP.ms REST API client (SMS only).

use reqwest::blocking::Client;
use serde::Deserialize;

use super::{DispatchOutcome, Notifier};
use crate::config::NotificationCredentials;

const BASE_URL: &str = "https://voip.ms/api/v1/rest.php";

pub struct VoipMsClient {
    client: Client,
    base_url: String,
    username: String,
    password: String,
}

impl VoipMsClient {
    pub fn new(credentials: &NotificationCredentials) -> Self {
        Self::with_base_url(credentials, BASE_URL)
    }

    pub fn with_base_url(credentials: &NotificationCredentials, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            username: credentials.username.clone(),
            password: credentials.password.clone(),
        }
    }

    /// Errors are formatted without the request URL: its query carries the password.
    fn request(&self, origin: &str, destination: &str, text: &str) -> Result<String, String> {
        let resp = self
            .client
            .get(&self.base_url)
            .query(&[
                ("api_username", self.username.as_str()),
                ("api_password", self.password.as_str()),
                ("method", "sendSMS"),
                ("did", origin),
                ("dst", destination),
                ("message", text),
            ])
            .send()
            .map_err(|e| format!("Request failed: {}", e.without_url()))?;

        if !resp.status().is_success() {
            return Err(format!("Request failed with status {}.", resp.status()));
        }

        resp.text()
            .map_err(|e| format!("Failed to read VoIP.ms response: {}", e.without_url()))
    }
}

impl Notifier for VoipMsClient {
    fn name(&self) -> &str {
        "voip.ms"
    }

    fn send(&self, origin: &str, destination: &str, text: &str) -> DispatchOutcome {
        match self.request(origin, destination, text) {
            Ok(body) => outcome_from_body(&body),
            Err(detail) => DispatchOutcome::failure(detail),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SendSmsResponse {
    status: String,
}

/// VoIP.ms reports application errors with HTTP 200 and a non-"success" status.
fn outcome_from_body(body: &str) -> DispatchOutcome {
    let body = body.trim();
    match serde_json::from_str::<SendSmsResponse>(body) {
        Ok(resp) if resp.status == "success" => DispatchOutcome::success(body),
        Ok(_) => DispatchOutcome::failure(body),
        Err(e) => DispatchOutcome::failure(format!("Failed to parse VoIP.ms response: {e}")),
    }
}
