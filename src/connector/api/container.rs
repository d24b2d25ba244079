use std::sync::{Arc, OnceLock};
use std::time::Duration;

use anyhow::Result;
use tracing::debug;

use crate::application::{CompletionService, NegotiateUseCase};
use crate::{ChatCompletionClient, CompletionConfig, MockCompletion};

#[derive(Debug, Default)]
pub struct ContainerConfig {
    /// Answer from [`MockCompletion`] instead of calling the API.
    pub mock: bool,
    /// Overrides `AIML_BASE_URL`.
    pub base_url: Option<String>,
    /// Overrides `AIML_MODEL`.
    pub model: Option<String>,
    pub timeout_secs: Option<u64>,
    pub max_retries: u32,
}

/// Builds the completion service on first use, so commands that never talk
/// to the API (`personas`, `scenarios`) do not require an API key.
pub struct Container {
    completion_service: OnceLock<Arc<dyn CompletionService>>,
    config: ContainerConfig,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Self {
        Self {
            completion_service: OnceLock::new(),
            config,
        }
    }

    /// Container with a pre-built service, bypassing environment configuration.
    pub fn with_completion_service(
        config: ContainerConfig,
        service: Arc<dyn CompletionService>,
    ) -> Self {
        let completion_service = OnceLock::new();
        let _ = completion_service.set(service);
        Self {
            completion_service,
            config,
        }
    }

    pub fn completion_service(&self) -> Result<Arc<dyn CompletionService>> {
        if let Some(service) = self.completion_service.get() {
            return Ok(Arc::clone(service));
        }

        let service = self.build_completion_service()?;
        let _ = self.completion_service.set(Arc::clone(&service));
        Ok(service)
    }

    pub fn negotiate_use_case(&self) -> Result<NegotiateUseCase> {
        Ok(NegotiateUseCase::new(self.completion_service()?))
    }

    pub fn is_mock(&self) -> bool {
        self.config.mock
    }

    fn build_completion_service(&self) -> Result<Arc<dyn CompletionService>> {
        if self.config.mock {
            debug!("Using mock completion service");
            return Ok(Arc::new(MockCompletion::new()));
        }

        let mut completion_config = CompletionConfig::from_env()?;
        if let Some(base_url) = &self.config.base_url {
            completion_config = completion_config.with_base_url(base_url.clone());
        }
        if let Some(model) = &self.config.model {
            completion_config = completion_config.with_model(model.clone());
        }
        if let Some(secs) = self.config.timeout_secs {
            completion_config = completion_config.with_timeout(Duration::from_secs(secs));
        }
        completion_config = completion_config.with_max_retries(self.config.max_retries);

        let client = ChatCompletionClient::new(completion_config)?;
        debug!("Using chat-completion endpoint {}", client.endpoint());
        Ok(Arc::new(client))
    }
}
