//! Notification credentials loaded from the environment.
//!
//! The four values are all-or-nothing: a partial set disables dispatch, never
//! the rest of the run.

pub const ENV_USERNAME: &str = "VOIPMS_USERNAME";
pub const ENV_PASSWORD: &str = "VOIPMS_API_PASSWORD";
pub const ENV_ORIGIN: &str = "VOIPMS_DID";
pub const ENV_DESTINATION: &str = "VOIPMS_TO_NUMBER";

/// A complete credential bundle for the SMS gateway.
#[derive(Clone, PartialEq, Eq)]
pub struct NotificationCredentials {
    pub username: String,
    pub password: String,
    /// SMS-enabled number messages are sent from.
    pub origin: String,
    pub destination: String,
}

impl std::fmt::Debug for NotificationCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("origin", &self.origin)
            .field("destination", &self.destination)
            .finish()
    }
}

/// Whatever credential values were found; any of them may be absent.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CredentialSet {
    username: Option<String>,
    password: Option<String>,
    origin: Option<String>,
    destination: Option<String>,
}

impl std::fmt::Debug for CredentialSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialSet")
            .field("missing", &self.missing())
            .finish()
    }
}

impl CredentialSet {
    /// Load from the process environment (and an optional `.env` file).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary key lookup. Empty values count as missing.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        Self {
            username: get(ENV_USERNAME),
            password: get(ENV_PASSWORD),
            origin: get(ENV_ORIGIN),
            destination: get(ENV_DESTINATION),
        }
    }

    /// Names of the variables that were not provided.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            (ENV_USERNAME, self.username.is_none()),
            (ENV_PASSWORD, self.password.is_none()),
            (ENV_ORIGIN, self.origin.is_none()),
            (ENV_DESTINATION, self.destination.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect()
    }

    pub fn complete(&self) -> Option<NotificationCredentials> {
        Some(NotificationCredentials {
            username: self.username.clone()?,
            password: self.password.clone()?,
            origin: self.origin.clone()?,
            destination: self.destination.clone()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn all_four_values_make_a_complete_set() {
        let set = CredentialSet::from_lookup(lookup_from(&[
            (ENV_USERNAME, "ops@example.test"),
            (ENV_PASSWORD, "secret"),
            (ENV_ORIGIN, "5550001111"),
            (ENV_DESTINATION, " 5552223333 "),
        ]));
        let creds = set.complete().unwrap();
        assert_eq!(creds.destination, "5552223333");
        assert!(set.missing().is_empty());
    }

    #[test]
    fn three_of_four_is_incomplete() {
        let set = CredentialSet::from_lookup(lookup_from(&[
            (ENV_USERNAME, "ops@example.test"),
            (ENV_PASSWORD, "secret"),
            (ENV_ORIGIN, "5550001111"),
        ]));
        assert!(set.complete().is_none());
        assert_eq!(set.missing(), vec![ENV_DESTINATION]);
    }

    #[test]
    fn empty_values_count_as_missing() {
        let set = CredentialSet::from_lookup(lookup_from(&[
            (ENV_USERNAME, ""),
            (ENV_PASSWORD, "secret"),
            (ENV_ORIGIN, "   "),
            (ENV_DESTINATION, "5552223333"),
        ]));
        assert_eq!(set.missing(), vec![ENV_USERNAME, ENV_ORIGIN]);
    }

    #[test]
    fn debug_output_hides_password() {
        let creds = NotificationCredentials {
            username: "u".to_string(),
            password: "hunter2".to_string(),
            origin: "1".to_string(),
            destination: "2".to_string(),
        };
        assert!(!format!("{creds:?}").contains("hunter2"));
    }
}
