use serde_json::{json, Map, Value};

use crate::adapters::log::EventLog;

pub trait SecretStore {
    fn get_secret_string(&self, secret_name: &str) -> Result<String, String>;
}

/// Store used when no secrets backend is wired in. Every lookup fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableSecretStore;

impl SecretStore for UnavailableSecretStore {
    fn get_secret_string(&self, secret_name: &str) -> Result<String, String> {
        Err(format!("no secret store configured for '{secret_name}'"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretError {
    pub secret_name: String,
    pub message: String,
}

impl std::fmt::Display for SecretError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to get secret {}: {}", self.secret_name, self.message)
    }
}

impl std::error::Error for SecretError {}

/// Fetches a secret and parses it as a JSON object. Failures are logged and
/// returned to the caller; a missing secret is a configuration error.
pub fn get_secret(
    store: &dyn SecretStore,
    log: &dyn EventLog,
    secret_name: &str,
) -> Result<Map<String, Value>, SecretError> {
    let result = store
        .get_secret_string(secret_name)
        .and_then(|raw| parse_secret(&raw));

    result.map_err(|message| {
        log.error(
            "secret_fetch_failed",
            json!({
                "secret_name": secret_name,
                "error": message.clone(),
            }),
        );
        SecretError {
            secret_name: secret_name.to_string(),
            message,
        }
    })
}

fn parse_secret(raw: &str) -> Result<Map<String, Value>, String> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err("secret string must be a JSON object".to_string()),
        Err(error) => Err(format!("secret string is not valid JSON: {error}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::config::LogLevel;
    use crate::test_helpers::{RecordingLog, StaticSecretStore};

    #[test]
    fn parses_secret_object() {
        let store = StaticSecretStore::new().with_secret(
            "db/credentials",
            r#"{"username":"app","password":"hunter2"}"#,
        );
        let log = RecordingLog::new();

        let secret = get_secret(&store, &log, "db/credentials").expect("secret should load");
        assert_eq!(secret["username"], "app");
        assert!(log.entries().is_empty());
    }

    #[test]
    fn propagates_fetch_failure_and_logs_it() {
        let store = StaticSecretStore::new();
        let log = RecordingLog::new();

        let error = get_secret(&store, &log, "missing").expect_err("missing secret should fail");
        assert_eq!(error.secret_name, "missing");
        assert!(error.to_string().starts_with("failed to get secret missing"));

        let entries = log.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].level, LogLevel::Error);
        assert_eq!(entries[0].event, "secret_fetch_failed");
    }

    #[test]
    fn propagates_parse_failure() {
        let store = StaticSecretStore::new()
            .with_secret("plain", "not json")
            .with_secret("list", "[1,2]");
        let log = RecordingLog::new();

        let error = get_secret(&store, &log, "plain").expect_err("plain text should fail");
        assert!(error.message.contains("not valid JSON"));

        let error = get_secret(&store, &log, "list").expect_err("array should fail");
        assert_eq!(error.message, "secret string must be a JSON object");
    }

    #[test]
    fn unavailable_store_always_fails() {
        let log = RecordingLog::new();
        let error = get_secret(&UnavailableSecretStore, &log, "any").expect_err("should fail");
        assert_eq!(error.message, "no secret store configured for 'any'");
    }
}
