pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";
pub const API_BASE_URL_ENV: &str = "API_BASE_URL";
pub const NOTIFICATION_TOPIC_ARN_ENV: &str = "NOTIFICATION_TOPIC_ARN";
pub const STAGE_ENV: &str = "STAGE";

pub const DEFAULT_API_BASE_URL: &str = "https://api.example.com";
pub const DEFAULT_STAGE: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_uppercase().as_str() {
            "TRACE" => Ok(Self::Trace),
            "DEBUG" => Ok(Self::Debug),
            "INFO" => Ok(Self::Info),
            "WARN" | "WARNING" => Ok(Self::Warn),
            "ERROR" | "CRITICAL" => Ok(Self::Error),
            other => Err(ConfigError::new(format!(
                "{LOG_LEVEL_ENV} has unsupported value '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Environment-provided handler settings. Every value is optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerConfig {
    pub log_level: LogLevel,
    pub api_base_url: String,
    pub notification_topic_arn: Option<String>,
    pub stage: String,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            notification_topic_arn: None,
            stage: DEFAULT_STAGE.to_string(),
        }
    }
}

impl HandlerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable source. Blank values are
    /// treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let log_level = match read(LOG_LEVEL_ENV) {
            Some(value) => LogLevel::parse(&value)?,
            None => LogLevel::default(),
        };

        Ok(Self {
            log_level,
            api_base_url: read(API_BASE_URL_ENV)
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            notification_topic_arn: read(NOTIFICATION_TOPIC_ARN_ENV),
            stage: read(STAGE_ENV).unwrap_or_else(|| DEFAULT_STAGE.to_string()),
        })
    }
}
