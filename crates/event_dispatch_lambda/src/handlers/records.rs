use serde::Deserialize;
use serde_json::{json, Value};

use crate::adapters::log::EventLog;
use crate::handlers::dispatch::DispatchError;
use crate::runtime::classify::{classify_record, RecordKind, RECORDS_FIELD};
use crate::runtime::context::InvocationContext;
use crate::runtime::contract::{
    ApiGatewayResponse, Headers, RecordResult, RecordsBody, DEFAULT_NOTIFICATION_SUBJECT,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordError {
    message: String,
}

impl RecordError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for RecordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for RecordError {}

#[derive(Debug, Deserialize)]
struct StorageRecord {
    s3: StorageEntity,
}

#[derive(Debug, Deserialize)]
struct StorageEntity {
    bucket: StorageBucket,
    object: StorageObject,
}

#[derive(Debug, Deserialize)]
struct StorageBucket {
    name: String,
}

#[derive(Debug, Deserialize)]
struct StorageObject {
    key: String,
}

#[derive(Debug, Deserialize)]
struct NotificationRecord {
    #[serde(rename = "Sns")]
    sns: NotificationMessage,
}

#[derive(Debug, Deserialize)]
struct NotificationMessage {
    #[serde(rename = "Message")]
    message: String,
    #[serde(rename = "Subject", default)]
    subject: Option<String>,
}

/// Processes every entry of the `Records` batch in input order. A failing
/// record becomes an error entry; its siblings are still processed.
pub fn handle_records(
    event: &Value,
    context: &InvocationContext,
    log: &dyn EventLog,
) -> Result<ApiGatewayResponse, DispatchError> {
    let records = event
        .get(RECORDS_FIELD)
        .and_then(Value::as_array)
        .ok_or_else(|| {
            DispatchError::MalformedEvent(format!("{RECORDS_FIELD} must be an array"))
        })?;

    log.info("records_received", json!({"count": records.len()}));

    let results: Vec<RecordResult> = records
        .iter()
        .enumerate()
        .map(|(index, record)| process_record(index, record, log))
        .collect();

    let body = RecordsBody {
        message: format!("Processed {} records", records.len()),
        results,
        request_id: context.request_id().to_string(),
    };

    Ok(ApiGatewayResponse::json(200, Headers::new(), &body)?)
}

pub fn process_record(index: usize, record: &Value, log: &dyn EventLog) -> RecordResult {
    let kind = classify_record(record);
    let outcome = match kind {
        RecordKind::StorageObject => process_storage_record(record, log),
        RecordKind::Notification => process_notification_record(record, log),
        RecordKind::Unknown => Ok(RecordResult::skipped_unknown()),
    };

    outcome.unwrap_or_else(|error| {
        log.error(
            "record_failed",
            json!({
                "index": index,
                "kind": kind.as_str(),
                "error": error.message(),
            }),
        );
        RecordResult::failed(error.message())
    })
}

pub fn process_storage_record(
    record: &Value,
    log: &dyn EventLog,
) -> Result<RecordResult, RecordError> {
    let parsed = StorageRecord::deserialize(record)
        .map_err(|error| RecordError::new(format!("invalid s3 record: {error}")))?;
    let bucket = parsed.s3.bucket.name;
    let key = parsed.s3.object.key;

    log.info("storage_object", json!({"uri": format!("s3://{bucket}/{key}")}));

    Ok(RecordResult::storage_object(bucket, key))
}

pub fn process_notification_record(
    record: &Value,
    log: &dyn EventLog,
) -> Result<RecordResult, RecordError> {
    let parsed = NotificationRecord::deserialize(record)
        .map_err(|error| RecordError::new(format!("invalid sns record: {error}")))?;
    let subject = parsed
        .sns
        .subject
        .unwrap_or_else(|| DEFAULT_NOTIFICATION_SUBJECT.to_string());

    log.info("notification_message", json!({"subject": subject}));

    Ok(RecordResult::notification(subject, parsed.sns.message.chars().count()))
}
