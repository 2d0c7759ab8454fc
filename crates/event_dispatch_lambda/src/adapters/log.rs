use serde_json::Value;

use crate::runtime::config::LogLevel;

/// Structured log sink handed to the dispatcher. Every record carries an
/// event name and a JSON details object.
pub trait EventLog {
    fn log(&self, level: LogLevel, event: &str, details: Value);

    fn debug(&self, event: &str, details: Value) {
        self.log(LogLevel::Debug, event, details);
    }

    fn info(&self, event: &str, details: Value) {
        self.log(LogLevel::Info, event, details);
    }

    fn warn(&self, event: &str, details: Value) {
        self.log(LogLevel::Warn, event, details);
    }

    fn error(&self, event: &str, details: Value) {
        self.log(LogLevel::Error, event, details);
    }
}

/// Forwards records to the `tracing` macros.
#[derive(Debug, Clone, Copy)]
pub struct TracingEventLog {
    component: &'static str,
}

impl TracingEventLog {
    pub fn new(component: &'static str) -> Self {
        Self { component }
    }
}

impl EventLog for TracingEventLog {
    fn log(&self, level: LogLevel, event: &str, details: Value) {
        let component = self.component;
        match level {
            LogLevel::Trace => tracing::trace!(component, details = %details, "{event}"),
            LogLevel::Debug => tracing::debug!(component, details = %details, "{event}"),
            LogLevel::Info => tracing::info!(component, details = %details, "{event}"),
            LogLevel::Warn => tracing::warn!(component, details = %details, "{event}"),
            LogLevel::Error => tracing::error!(component, details = %details, "{event}"),
        }
    }
}

pub fn tracing_level(level: LogLevel) -> tracing::Level {
    match level {
        LogLevel::Trace => tracing::Level::TRACE,
        LogLevel::Debug => tracing::Level::DEBUG,
        LogLevel::Info => tracing::Level::INFO,
        LogLevel::Warn => tracing::Level::WARN,
        LogLevel::Error => tracing::Level::ERROR,
    }
}

/// Installs the process-wide JSON subscriber. CloudWatch stamps ingestion
/// time, so timestamps and targets are left out.
pub fn install_json_subscriber(level: LogLevel) {
    tracing_subscriber::fmt()
        .json()
        .with_max_level(tracing_level(level))
        .with_target(false)
        .without_time()
        .init();
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::test_helpers::RecordingLog;

    #[test]
    fn level_helpers_route_to_matching_level() {
        let log = RecordingLog::new();
        log.debug("a", json!({}));
        log.info("b", json!({}));
        log.warn("c", json!({}));
        log.error("d", json!({"error": "boom"}));

        let levels: Vec<LogLevel> = log.entries().iter().map(|entry| entry.level).collect();
        assert_eq!(
            levels,
            vec![LogLevel::Debug, LogLevel::Info, LogLevel::Warn, LogLevel::Error]
        );
        assert_eq!(log.entries()[3].details["error"], "boom");
    }

    #[test]
    fn maps_levels_onto_tracing() {
        assert_eq!(tracing_level(LogLevel::Warn), tracing::Level::WARN);
        assert_eq!(tracing_level(LogLevel::Trace), tracing::Level::TRACE);
    }
}
