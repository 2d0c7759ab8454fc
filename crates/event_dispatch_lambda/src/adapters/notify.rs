use serde_json::json;

use crate::adapters::log::EventLog;
use crate::runtime::config::HandlerConfig;

pub const NOTIFICATION_SUBJECT: &str = "Lambda Function Notification";

pub trait Notifier {
    fn publish(&self, topic_arn: &str, subject: &str, message: &str) -> Result<(), String>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn publish(&self, _topic_arn: &str, _subject: &str, _message: &str) -> Result<(), String> {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationStatus {
    Sent { topic_arn: String },
    SkippedNoTopic,
    Failed { topic_arn: String, message: String },
}

/// Publishes `message` to `topic_arn`, or to the configured default topic.
/// Publish failures are logged and reported, never propagated.
pub fn send_notification(
    notifier: &dyn Notifier,
    log: &dyn EventLog,
    config: &HandlerConfig,
    message: &str,
    topic_arn: Option<&str>,
) -> NotificationStatus {
    let topic_arn = topic_arn
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .or(config.notification_topic_arn.as_deref());

    let Some(topic_arn) = topic_arn else {
        log.warn(
            "notification_skipped",
            json!({"reason": "No notification topic configured"}),
        );
        return NotificationStatus::SkippedNoTopic;
    };

    match notifier.publish(topic_arn, NOTIFICATION_SUBJECT, message) {
        Ok(()) => {
            log.info("notification_sent", json!({"topic_arn": topic_arn}));
            NotificationStatus::Sent {
                topic_arn: topic_arn.to_string(),
            }
        }
        Err(error) => {
            log.error(
                "notification_failed",
                json!({
                    "topic_arn": topic_arn,
                    "error": error.clone(),
                }),
            );
            NotificationStatus::Failed {
                topic_arn: topic_arn.to_string(),
                message: error,
            }
        }
    }
}
