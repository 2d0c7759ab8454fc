use chrono::{DateTime, SecondsFormat, Utc};

/// Per-call invocation handle supplied by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationContext {
    pub request_id: String,
    pub function_name: String,
    pub invoked_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextError {
    message: String,
}

impl ContextError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ContextError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ContextError {}

impl InvocationContext {
    pub fn new(
        request_id: impl Into<String>,
        function_name: impl Into<String>,
        invoked_at: DateTime<Utc>,
    ) -> Self {
        Self {
            request_id: request_id.into(),
            function_name: function_name.into(),
            invoked_at,
        }
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Fails when the runtime handed over a context without a function name.
    pub fn function_name(&self) -> Result<&str, ContextError> {
        let name = self.function_name.trim();
        if name.is_empty() {
            return Err(ContextError::new(
                "invocation context is missing function_name",
            ));
        }
        Ok(name)
    }

    pub fn timestamp(&self) -> String {
        self.invoked_at.to_rfc3339_opts(SecondsFormat::Micros, true)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 14, 9, 30, 0)
            .single()
            .expect("valid timestamp")
    }

    #[test]
    fn blank_function_name_is_malformed() {
        let context = InvocationContext::new("req-1", "  ", fixed_time());
        let error = context.function_name().expect_err("blank name should fail");
        assert_eq!(error.message(), "invocation context is missing function_name");
    }

    #[test]
    fn timestamp_is_rfc3339_utc() {
        let context = InvocationContext::new("req-1", "fn", fixed_time());
        assert_eq!(context.timestamp(), "2026-02-14T09:30:00.000000Z");
    }
}
