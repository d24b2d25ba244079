use async_trait::async_trait;
use tracing::debug;

use crate::application::CompletionService;
use crate::domain::{CompletionResult, NegotiationRequest};

/// Offline [`CompletionService`] that answers from a fixed template.
///
/// Output depends only on the request, which keeps demos and tests
/// reproducible without network access or an API key.
pub struct MockCompletion;

impl MockCompletion {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MockCompletion {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionService for MockCompletion {
    async fn complete(&self, request: &NegotiationRequest) -> CompletionResult {
        debug!("MockCompletion answering offline");

        let mut advice = format!(
            "[{}] Advice for \"{}\"\n\n\
             1. Situation: {}\n\
             2. Stakeholders: list who gains and who loses before you speak.\n\
             3. Communication: open with shared interests, then state your anchor.\n\
             4. Win-win: trade low-cost concessions for high-value ones.\n\
             5. Objections: prepare a response to the strongest likely \"no\".\n\
             6. Technique: use silence after your offer.",
            request.persona(),
            request.scenario(),
            request.prompt_text().trim()
        );
        if request.has_images() {
            advice.push_str(&format!(
                "\n\nReviewed {} attached image(s).",
                request.images().len()
            ));
        }
        Ok(advice)
    }

    fn model_name(&self) -> &str {
        "mock-completion"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ImageBlob;

    #[tokio::test]
    async fn test_mock_completion_is_deterministic() {
        let service = MockCompletion::new();
        let request = NegotiationRequest::new("The Diplomat", "Workplace Conflict", "My manager");

        let first = service.complete(&request).await.unwrap();
        let second = service.complete(&request).await.unwrap();

        assert_eq!(first, second);
        assert!(first.starts_with("[The Diplomat] Advice for \"Workplace Conflict\""));
        assert!(!first.contains("attached image"));
    }

    #[tokio::test]
    async fn test_mock_completion_mentions_images() {
        let request = NegotiationRequest::new("The Dealmaker", "Contract Dispute", "Offer")
            .with_image(ImageBlob::new(vec![1]))
            .with_image(ImageBlob::new(vec![2]));

        let advice = MockCompletion::new().complete(&request).await.unwrap();
        assert!(advice.ends_with("Reviewed 2 attached image(s)."));
    }
}
