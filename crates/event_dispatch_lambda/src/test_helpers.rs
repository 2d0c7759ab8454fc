//! Test helpers for dispatcher tests.
//!
//! In-memory implementations of the capability traits plus a fixed invocation
//! context, shared by unit tests and the integration tests under `tests/`.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::adapters::log::EventLog;
use crate::adapters::notify::Notifier;
use crate::adapters::secrets::SecretStore;
use crate::runtime::config::LogLevel;
use crate::runtime::context::InvocationContext;

pub const TEST_REQUEST_ID: &str = "test-request-id";
pub const TEST_FUNCTION_NAME: &str = "test-function";

/// Fixed invocation time used by every test context.
pub fn test_invoked_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 14, 9, 30, 0)
        .single()
        .expect("fixed test timestamp should be valid")
}

pub fn test_context() -> InvocationContext {
    InvocationContext::new(TEST_REQUEST_ID, TEST_FUNCTION_NAME, test_invoked_at())
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub event: String,
    pub details: Value,
}

#[derive(Debug, Default)]
pub struct RecordingLog {
    entries: Mutex<Vec<LogEntry>>,
}

impl RecordingLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().expect("poisoned mutex").clone()
    }

    pub fn events(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .map(|entry| entry.event)
            .collect()
    }

    pub fn find(&self, event: &str) -> Option<LogEntry> {
        self.entries().into_iter().find(|entry| entry.event == event)
    }
}

impl EventLog for RecordingLog {
    fn log(&self, level: LogLevel, event: &str, details: Value) {
        self.entries
            .lock()
            .expect("poisoned mutex")
            .push(LogEntry {
                level,
                event: event.to_string(),
                details,
            });
    }
}

#[derive(Debug, Default)]
pub struct StaticSecretStore {
    secrets: HashMap<String, String>,
}

impl StaticSecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_secret(mut self, name: &str, value: &str) -> Self {
        self.secrets.insert(name.to_string(), value.to_string());
        self
    }
}

impl SecretStore for StaticSecretStore {
    fn get_secret_string(&self, secret_name: &str) -> Result<String, String> {
        self.secrets
            .get(secret_name)
            .cloned()
            .ok_or_else(|| format!("secret '{secret_name}' not found"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedNotification {
    pub topic_arn: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    published: Mutex<Vec<PublishedNotification>>,
    failure: Option<String>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifier whose every publish fails with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            published: Mutex::new(Vec::new()),
            failure: Some(message.to_string()),
        }
    }

    pub fn published(&self) -> Vec<PublishedNotification> {
        self.published.lock().expect("poisoned mutex").clone()
    }
}

impl Notifier for RecordingNotifier {
    fn publish(&self, topic_arn: &str, subject: &str, message: &str) -> Result<(), String> {
        if let Some(failure) = &self.failure {
            return Err(failure.clone());
        }
        self.published
            .lock()
            .expect("poisoned mutex")
            .push(PublishedNotification {
                topic_arn: topic_arn.to_string(),
                subject: subject.to_string(),
                message: message.to_string(),
            });
        Ok(())
    }
}
