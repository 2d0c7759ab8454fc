use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const DEFAULT_DIRECT_MESSAGE: &str = "Hello, World!";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";
pub const UNKNOWN_RECORD_REASON: &str = "unknown record type";
pub const STORAGE_OBJECT_ACTION: &str = "example_processing";
pub const DEFAULT_NOTIFICATION_SUBJECT: &str = "No subject";

pub type Headers = BTreeMap<String, String>;

/// Status/body envelope returned for HTTP- and records-triggered invocations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: Headers,
    pub body: String,
}

impl ApiGatewayResponse {
    pub fn json(
        status_code: u16,
        headers: Headers,
        payload: &impl Serialize,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            status_code,
            headers,
            body: serde_json::to_string(payload)?,
        })
    }

    /// Detail-free 500 envelope. Only the request id is surfaced.
    pub fn internal_error(request_id: &str) -> Self {
        Self {
            status_code: 500,
            headers: json_headers(),
            body: json!({
                "error": INTERNAL_ERROR_MESSAGE,
                "requestId": request_id,
            })
            .to_string(),
        }
    }

    pub fn body_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

pub fn json_headers() -> Headers {
    Headers::from([("Content-Type".to_string(), "application/json".to_string())])
}

pub fn cors_json_headers() -> Headers {
    let mut headers = json_headers();
    headers.insert("Access-Control-Allow-Origin".to_string(), "*".to_string());
    headers
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiRequestBody {
    pub message: String,
    pub method: String,
    pub path: String,
    pub timestamp: String,
    #[serde(rename = "requestId")]
    pub request_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecordsBody {
    pub message: String,
    pub results: Vec<RecordResult>,
    #[serde(rename = "requestId")]
    pub request_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageObjectResult {
    pub status: String,
    pub bucket: String,
    pub key: String,
    pub action: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationResult {
    pub status: String,
    pub subject: String,
    pub message_length: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkippedResult {
    pub status: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FailedResult {
    pub status: String,
    pub error: String,
}

/// Outcome of processing one entry of a `Records` batch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RecordResult {
    StorageObject(StorageObjectResult),
    Notification(NotificationResult),
    Skipped(SkippedResult),
    Failed(FailedResult),
}

impl RecordResult {
    pub fn storage_object(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self::StorageObject(StorageObjectResult {
            status: "processed".to_string(),
            bucket: bucket.into(),
            key: key.into(),
            action: STORAGE_OBJECT_ACTION.to_string(),
        })
    }

    pub fn notification(subject: impl Into<String>, message_length: usize) -> Self {
        Self::Notification(NotificationResult {
            status: "processed".to_string(),
            subject: subject.into(),
            message_length,
        })
    }

    pub fn skipped_unknown() -> Self {
        Self::Skipped(SkippedResult {
            status: "skipped".to_string(),
            reason: UNKNOWN_RECORD_REASON.to_string(),
        })
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self::Failed(FailedResult {
            status: "error".to_string(),
            error: error.into(),
        })
    }

    pub fn status(&self) -> &str {
        match self {
            Self::StorageObject(result) => &result.status,
            Self::Notification(result) => &result.status,
            Self::Skipped(result) => &result.status,
            Self::Failed(result) => &result.status,
        }
    }
}

/// Result of a direct invocation. Returned as-is, without a status/body envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DirectInvocationResult {
    pub message: String,
    pub input_data: Value,
    pub timestamp: String,
    pub function_name: String,
    #[serde(rename = "requestId")]
    pub request_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum DispatchOutcome {
    Envelope(ApiGatewayResponse),
    Direct(DirectInvocationResult),
}

impl DispatchOutcome {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Envelope(response) => Some(response.status_code),
            Self::Direct(_) => None,
        }
    }

    pub fn envelope(&self) -> Option<&ApiGatewayResponse> {
        match self {
            Self::Envelope(response) => Some(response),
            Self::Direct(_) => None,
        }
    }

    pub fn direct(&self) -> Option<&DirectInvocationResult> {
        match self {
            Self::Envelope(_) => None,
            Self::Direct(result) => Some(result),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_error_body_only_carries_generic_message_and_request_id() {
        let response = ApiGatewayResponse::internal_error("req-42");
        assert_eq!(response.status_code, 500);
        assert_eq!(
            response.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
        let body = response.body_json().expect("body should parse");
        assert_eq!(
            body,
            json!({"error": "Internal server error", "requestId": "req-42"})
        );
    }

    #[test]
    fn empty_headers_are_omitted_from_the_wire_shape() {
        let response = ApiGatewayResponse::json(200, Headers::new(), &json!({"ok": true}))
            .expect("payload should serialize");
        let wire = serde_json::to_value(&response).expect("response should serialize");
        assert_eq!(wire, json!({"statusCode": 200, "body": "{\"ok\":true}"}));
    }

    #[test]
    fn record_results_serialize_flat() {
        let results = vec![
            RecordResult::storage_object("bucket-a", "path/key.csv"),
            RecordResult::notification("Alert", 5),
            RecordResult::skipped_unknown(),
            RecordResult::failed("boom"),
        ];
        let wire = serde_json::to_value(&results).expect("results should serialize");
        assert_eq!(
            wire,
            json!([
                {"status": "processed", "bucket": "bucket-a", "key": "path/key.csv", "action": "example_processing"},
                {"status": "processed", "subject": "Alert", "message_length": 5},
                {"status": "skipped", "reason": "unknown record type"},
                {"status": "error", "error": "boom"},
            ])
        );
    }

    #[test]
    fn direct_outcome_is_not_wrapped() {
        let outcome = DispatchOutcome::Direct(DirectInvocationResult {
            message: "Processed: hi".to_string(),
            input_data: json!({}),
            timestamp: "2026-02-14T09:30:00.000000Z".to_string(),
            function_name: "fn".to_string(),
            request_id: "req-1".to_string(),
        });
        let wire = serde_json::to_value(&outcome).expect("outcome should serialize");
        assert!(wire.get("statusCode").is_none());
        assert_eq!(wire["requestId"], "req-1");
        assert_eq!(outcome.status_code(), None);
    }
}
