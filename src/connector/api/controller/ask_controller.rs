use std::path::PathBuf;

use anyhow::Result;

use crate::{NegotiationRequest, DEFAULT_SCENARIO};

use super::super::Container;
use super::{load_image, resolve_persona, resolve_scenario};

pub struct AskController<'a> {
    container: &'a Container,
}

impl<'a> AskController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn ask(
        &self,
        prompt: String,
        persona: Option<String>,
        scenario: Option<String>,
        images: Vec<PathBuf>,
    ) -> Result<String> {
        let persona = resolve_persona(persona.as_deref())?;
        let scenario = scenario
            .as_deref()
            .map(resolve_scenario)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_SCENARIO.to_string());

        let mut request = NegotiationRequest::new(persona.label(), scenario, prompt);
        for path in &images {
            request = request.with_image(load_image(path).await?);
        }

        let use_case = self.container.negotiate_use_case()?;
        let advice = use_case.ask(&request).await?;

        Ok(self.format_advice(&request, &advice))
    }

    fn format_advice(&self, request: &NegotiationRequest, advice: &str) -> String {
        format!(
            "{} on \"{}\":\n\n{}",
            request.persona(),
            request.scenario(),
            advice.trim_end()
        )
    }
}
