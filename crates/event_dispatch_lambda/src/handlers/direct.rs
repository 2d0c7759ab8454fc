use serde_json::{json, Value};

use crate::adapters::log::EventLog;
use crate::handlers::dispatch::DispatchError;
use crate::runtime::context::InvocationContext;
use crate::runtime::contract::{DirectInvocationResult, DEFAULT_DIRECT_MESSAGE};

/// Handles a manual or programmatic invocation. The result is returned bare,
/// not wrapped in a status/body envelope.
pub fn handle_direct_invocation(
    event: &Value,
    context: &InvocationContext,
    log: &dyn EventLog,
) -> Result<DirectInvocationResult, DispatchError> {
    let Some(fields) = event.as_object() else {
        return Err(DispatchError::MalformedEvent(
            "direct invocation payload must be a JSON object".to_string(),
        ));
    };

    log.info("direct_invocation", json!({"request_id": context.request_id()}));

    let message = fields
        .get("message")
        .map(render_message)
        .unwrap_or_else(|| DEFAULT_DIRECT_MESSAGE.to_string());
    let input_data = fields.get("data").cloned().unwrap_or_else(|| json!({}));

    let result = DirectInvocationResult {
        message: format!("Processed: {message}"),
        input_data,
        timestamp: context.timestamp(),
        function_name: context.function_name()?.to_string(),
        request_id: context.request_id().to_string(),
    };

    log.info("direct_result", serde_json::to_value(&result)?);
    Ok(result)
}

fn render_message(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{test_context, RecordingLog};

    #[test]
    fn defaults_message_and_data() {
        let log = RecordingLog::new();
        let result = handle_direct_invocation(&json!({"test": true}), &test_context(), &log)
            .expect("invocation should succeed");

        assert_eq!(result.message, "Processed: Hello, World!");
        assert_eq!(result.input_data, json!({}));
        assert_eq!(result.function_name, "test-function");
        assert_eq!(result.request_id, "test-request-id");
        assert_eq!(result.timestamp, "2026-02-14T09:30:00.000000Z");
        assert_eq!(log.events(), vec!["direct_invocation", "direct_result"]);
    }

    #[test]
    fn echoes_message_and_data() {
        let log = RecordingLog::new();
        let result = handle_direct_invocation(
            &json!({"message": "Local test run", "data": {"key": "value"}}),
            &test_context(),
            &log,
        )
        .expect("invocation should succeed");

        assert_eq!(result.message, "Processed: Local test run");
        assert_eq!(result.input_data, json!({"key": "value"}));
    }

    #[test]
    fn renders_non_string_message_as_json() {
        let log = RecordingLog::new();
        let result = handle_direct_invocation(&json!({"message": 42}), &test_context(), &log)
            .expect("invocation should succeed");
        assert_eq!(result.message, "Processed: 42");
    }

    #[test]
    fn rejects_non_object_payload() {
        let log = RecordingLog::new();
        let error = handle_direct_invocation(&json!("ping"), &test_context(), &log)
            .expect_err("string payload should fail");
        assert!(matches!(error, DispatchError::MalformedEvent(_)));
    }
}
