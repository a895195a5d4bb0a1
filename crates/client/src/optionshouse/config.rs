//! Client configuration

use crate::errors::{ClientError, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.optionshouse.com";

pub const ENV_USERNAME: &str = "OPTIONSHOUSE_USERNAME";
pub const ENV_PASSWORD: &str = "OPTIONSHOUSE_PASSWORD";
pub const ENV_TRACE: &str = "OPTIONSHOUSE_TRACE";

#[derive(Clone)]
pub struct OptionsHouseConfig {
    pub base_url: String,
    pub username: String,
    pub password: String,
    /// Log request round-trip times
    pub enable_timing: bool,
    /// Dump every request and response at debug level. Credentials
    /// appear in clear text in that output.
    pub trace_messages: bool,
}

impl Default for OptionsHouseConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            username: String::new(),
            password: String::new(),
            enable_timing: true,
            trace_messages: false,
        }
    }
}

impl OptionsHouseConfig {
    pub fn with_credentials(mut self, username: String, password: String) -> Self {
        self.username = username;
        self.password = password;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timing(mut self, enable: bool) -> Self {
        self.enable_timing = enable;
        self
    }

    pub fn with_message_tracing(mut self, enable: bool) -> Self {
        self.trace_messages = enable;
        self
    }

    /// Read credentials from `OPTIONSHOUSE_USERNAME` / `OPTIONSHOUSE_PASSWORD`;
    /// `OPTIONSHOUSE_TRACE=true` turns on message tracing.
    pub fn with_env_credentials(self) -> Result<Self> {
        self.with_env_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn with_env_lookup(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        self.username = lookup(ENV_USERNAME)
            .ok_or_else(|| ClientError::MissingCredentials(ENV_USERNAME.to_string()))?;
        self.password = lookup(ENV_PASSWORD)
            .ok_or_else(|| ClientError::MissingCredentials(ENV_PASSWORD.to_string()))?;

        if let Some(trace) = lookup(ENV_TRACE) {
            self.trace_messages = trace
                .parse::<bool>()
                .map_err(|_| ClientError::ConfigurationError(format!("{ENV_TRACE} must be true or false")))?;
        }
        Ok(self)
    }

    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

impl std::fmt::Debug for OptionsHouseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionsHouseConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"***")
            .field("enable_timing", &self.enable_timing)
            .field("trace_messages", &self.trace_messages)
            .finish()
    }
}
