use serde_json::{json, Map, Value};

use crate::adapters::log::EventLog;
use crate::adapters::notify::{send_notification, NotificationStatus, Notifier};
use crate::adapters::secrets::{get_secret, SecretError, SecretStore};
use crate::handlers::direct::handle_direct_invocation;
use crate::handlers::http::handle_http_request;
use crate::handlers::records::handle_records;
use crate::runtime::classify::{classify_event, EventKind};
use crate::runtime::config::HandlerConfig;
use crate::runtime::context::{ContextError, InvocationContext};
use crate::runtime::contract::{ApiGatewayResponse, DispatchOutcome};

/// Capabilities handed to the dispatcher for one invocation.
#[derive(Clone, Copy)]
pub struct DispatchDeps<'a> {
    pub config: &'a HandlerConfig,
    pub log: &'a dyn EventLog,
    pub secrets: &'a dyn SecretStore,
    pub notifier: &'a dyn Notifier,
}

impl DispatchDeps<'_> {
    pub fn get_secret(&self, secret_name: &str) -> Result<Map<String, Value>, SecretError> {
        get_secret(self.secrets, self.log, secret_name)
    }

    pub fn send_notification(&self, message: &str, topic_arn: Option<&str>) -> NotificationStatus {
        send_notification(self.notifier, self.log, self.config, message, topic_arn)
    }
}

#[derive(Debug)]
pub enum DispatchError {
    MalformedContext(ContextError),
    MalformedEvent(String),
    Serialization(serde_json::Error),
}

impl std::fmt::Display for DispatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedContext(error) => write!(f, "malformed invocation context: {error}"),
            Self::MalformedEvent(message) => write!(f, "malformed event: {message}"),
            Self::Serialization(error) => write!(f, "failed to serialize response: {error}"),
        }
    }
}

impl std::error::Error for DispatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MalformedContext(error) => Some(error),
            Self::MalformedEvent(_) => None,
            Self::Serialization(error) => Some(error),
        }
    }
}

impl From<ContextError> for DispatchError {
    fn from(error: ContextError) -> Self {
        Self::MalformedContext(error)
    }
}

impl From<serde_json::Error> for DispatchError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(error)
    }
}

/// Routes one invocation to the handler matching its event shape.
///
/// Faults from classification or delegation are logged in full and answered
/// with a detail-free 500 envelope. Per-record faults never reach this level.
pub fn handle_event(
    event: &Value,
    context: &InvocationContext,
    deps: &DispatchDeps<'_>,
) -> DispatchOutcome {
    match dispatch_event(event, context, deps) {
        Ok(outcome) => outcome,
        Err(error) => {
            deps.log.error(
                "dispatch_failed",
                json!({
                    "request_id": context.request_id(),
                    "error": error.to_string(),
                    "error_debug": format!("{error:?}"),
                }),
            );
            DispatchOutcome::Envelope(ApiGatewayResponse::internal_error(context.request_id()))
        }
    }
}

fn dispatch_event(
    event: &Value,
    context: &InvocationContext,
    deps: &DispatchDeps<'_>,
) -> Result<DispatchOutcome, DispatchError> {
    let kind = classify_event(event);
    deps.log.info(
        "event_received",
        json!({
            "request_id": context.request_id(),
            "kind": kind.as_str(),
            "event": event,
        }),
    );

    match kind {
        EventKind::HttpRequest => {
            handle_http_request(event, context, deps.log).map(DispatchOutcome::Envelope)
        }
        EventKind::Records => {
            handle_records(event, context, deps.log).map(DispatchOutcome::Envelope)
        }
        EventKind::DirectInvocation => {
            handle_direct_invocation(event, context, deps.log).map(DispatchOutcome::Direct)
        }
    }
}
