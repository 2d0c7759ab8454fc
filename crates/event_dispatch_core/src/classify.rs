use serde_json::Value;

pub const HTTP_METHOD_FIELD: &str = "httpMethod";
pub const RECORDS_FIELD: &str = "Records";
pub const STORAGE_RECORD_FIELD: &str = "s3";
pub const NOTIFICATION_RECORD_FIELD: &str = "Sns";

const DEFAULT_HTTP_METHOD: &str = "UNKNOWN";
const DEFAULT_HTTP_PATH: &str = "/";

/// Shape of an incoming invocation payload. Checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    HttpRequest,
    Records,
    DirectInvocation,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::HttpRequest => "http_request",
            Self::Records => "records",
            Self::DirectInvocation => "direct_invocation",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    StorageObject,
    Notification,
    Unknown,
}

impl RecordKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StorageObject => "storage_object",
            Self::Notification => "notification",
            Self::Unknown => "unknown",
        }
    }
}

pub fn classify_event(event: &Value) -> EventKind {
    if has_field(event, HTTP_METHOD_FIELD) || http_api_v2_method(event).is_some() {
        EventKind::HttpRequest
    } else if has_field(event, RECORDS_FIELD) {
        EventKind::Records
    } else {
        EventKind::DirectInvocation
    }
}

pub fn classify_record(record: &Value) -> RecordKind {
    if has_field(record, STORAGE_RECORD_FIELD) {
        RecordKind::StorageObject
    } else if has_field(record, NOTIFICATION_RECORD_FIELD) {
        RecordKind::Notification
    } else {
        RecordKind::Unknown
    }
}

/// Method and path of an HTTP-triggered event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequestLine {
    pub method: String,
    pub path: String,
}

impl HttpRequestLine {
    /// Reads the REST API (`httpMethod`/`path`) fields, falling back to the
    /// HTTP API v2 (`requestContext.http.method`/`rawPath`) layout.
    pub fn from_event(event: &Value) -> Self {
        let method = event
            .get(HTTP_METHOD_FIELD)
            .and_then(Value::as_str)
            .or_else(|| http_api_v2_method(event))
            .unwrap_or(DEFAULT_HTTP_METHOD);
        let path = event
            .get("path")
            .and_then(Value::as_str)
            .or_else(|| event.get("rawPath").and_then(Value::as_str))
            .unwrap_or(DEFAULT_HTTP_PATH);

        Self {
            method: method.to_string(),
            path: path.to_string(),
        }
    }
}

fn has_field(value: &Value, field: &str) -> bool {
    value
        .as_object()
        .map(|object| object.contains_key(field))
        .unwrap_or(false)
}

fn http_api_v2_method(event: &Value) -> Option<&str> {
    event
        .pointer("/requestContext/http/method")
        .and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn http_marker_wins_over_records() {
        let event = json!({
            "httpMethod": "GET",
            "Records": [{"s3": {}}],
        });
        assert_eq!(classify_event(&event), EventKind::HttpRequest);
    }

    #[test]
    fn http_marker_counts_even_when_null() {
        let event = json!({"httpMethod": null});
        assert_eq!(classify_event(&event), EventKind::HttpRequest);
    }

    #[test]
    fn http_api_v2_payload_is_an_http_request() {
        let event = json!({
            "rawPath": "/v2/items",
            "requestContext": {"http": {"method": "POST"}},
        });
        assert_eq!(classify_event(&event), EventKind::HttpRequest);

        let line = HttpRequestLine::from_event(&event);
        assert_eq!(line.method, "POST");
        assert_eq!(line.path, "/v2/items");
    }

    #[test]
    fn records_field_selects_records_path() {
        let event = json!({"Records": []});
        assert_eq!(classify_event(&event), EventKind::Records);
    }

    #[test]
    fn anything_else_is_a_direct_invocation() {
        assert_eq!(
            classify_event(&json!({"message": "hi"})),
            EventKind::DirectInvocation
        );
        assert_eq!(classify_event(&json!([1, 2])), EventKind::DirectInvocation);
        assert_eq!(classify_event(&Value::Null), EventKind::DirectInvocation);
    }

    #[test]
    fn storage_marker_wins_over_notification_marker() {
        let record = json!({"s3": {}, "Sns": {}});
        assert_eq!(classify_record(&record), RecordKind::StorageObject);
        assert_eq!(
            classify_record(&json!({"Sns": {}})),
            RecordKind::Notification
        );
    }

    #[test]
    fn unmarked_and_non_object_records_are_unknown() {
        assert_eq!(
            classify_record(&json!({"eventSource": "aws:sqs"})),
            RecordKind::Unknown
        );
        assert_eq!(classify_record(&json!("s3")), RecordKind::Unknown);
    }

    #[test]
    fn request_line_defaults_when_fields_missing() {
        let line = HttpRequestLine::from_event(&json!({"httpMethod": 7}));
        assert_eq!(line.method, "UNKNOWN");
        assert_eq!(line.path, "/");
    }
}
