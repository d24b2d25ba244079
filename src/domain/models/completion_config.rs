use std::fmt;
use std::time::Duration;

use crate::domain::DomainError;

pub const DEFAULT_BASE_URL: &str = "https://api.aimlapi.com";
pub const DEFAULT_MODEL: &str = "meta-llama/Llama-3.2-90B-Vision-Instruct-Turbo";

pub const API_KEY_VAR: &str = "AIML_API_KEY";
pub const BASE_URL_VAR: &str = "AIML_BASE_URL";
pub const MODEL_VAR: &str = "AIML_MODEL";

/// Construction-time settings for a completion client.
///
/// The `Debug` impl redacts the API key so the config can be logged safely.
#[derive(Clone)]
pub struct CompletionConfig {
    base_url: String,
    api_key: String,
    model: String,
    timeout: Option<Duration>,
    max_retries: u32,
}

impl CompletionConfig {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            timeout: None,
            max_retries: 0,
        }
    }

    /// Reads configuration from the environment:
    ///
    /// | Variable        | Default                                           |
    /// |-----------------|---------------------------------------------------|
    /// | `AIML_API_KEY`  | required                                          |
    /// | `AIML_BASE_URL` | `https://api.aimlapi.com`                         |
    /// | `AIML_MODEL`    | `meta-llama/Llama-3.2-90B-Vision-Instruct-Turbo`  |
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                DomainError::invalid_input(format!("{API_KEY_VAR} is not set"))
            })?;
        let base_url = lookup(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let model = lookup(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string());
        Ok(Self::new(base_url, api_key, model))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Extra attempts made after a transport failure. Zero means one attempt only.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }
}

impl fmt::Debug for CompletionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}
