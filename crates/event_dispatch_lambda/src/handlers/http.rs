use serde_json::{json, Value};

use crate::adapters::log::EventLog;
use crate::handlers::dispatch::DispatchError;
use crate::runtime::classify::HttpRequestLine;
use crate::runtime::context::InvocationContext;
use crate::runtime::contract::{cors_json_headers, ApiGatewayResponse, ApiRequestBody};

pub fn handle_http_request(
    event: &Value,
    context: &InvocationContext,
    log: &dyn EventLog,
) -> Result<ApiGatewayResponse, DispatchError> {
    let HttpRequestLine { method, path } = HttpRequestLine::from_event(event);
    log.info("api_request", json!({"method": method, "path": path}));

    let body = ApiRequestBody {
        message: format!("Hello from {path}!"),
        method,
        path,
        timestamp: context.timestamp(),
        request_id: context.request_id().to_string(),
    };

    Ok(ApiGatewayResponse::json(200, cors_json_headers(), &body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{test_context, RecordingLog};

    #[test]
    fn echoes_method_and_path() {
        let log = RecordingLog::new();
        let response = handle_http_request(
            &json!({"httpMethod": "POST", "path": "/orders", "body": "{}"}),
            &test_context(),
            &log,
        )
        .expect("request should succeed");

        assert_eq!(response.status_code, 200);
        assert_eq!(
            response
                .headers
                .get("Access-Control-Allow-Origin")
                .map(String::as_str),
            Some("*")
        );
        let body: ApiRequestBody =
            serde_json::from_str(&response.body).expect("body should parse");
        assert_eq!(body.message, "Hello from /orders!");
        assert_eq!(body.method, "POST");
        assert_eq!(body.path, "/orders");
        assert_eq!(body.request_id, "test-request-id");
        assert_eq!(body.timestamp, "2026-02-14T09:30:00.000000Z");

        let logged = log.find("api_request").expect("request should be logged");
        assert_eq!(logged.details, json!({"method": "POST", "path": "/orders"}));
    }

    #[test]
    fn defaults_missing_path_to_root() {
        let log = RecordingLog::new();
        let response = handle_http_request(&json!({"httpMethod": "GET"}), &test_context(), &log)
            .expect("request should succeed");

        let body: ApiRequestBody =
            serde_json::from_str(&response.body).expect("body should parse");
        assert_eq!(body.message, "Hello from /!");
    }
}
