use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::CompletionService;
use crate::domain::{ChatMessage, Conversation, DomainError, NegotiationRequest};

/// Runs one user turn: validate, record, ask the service, record the reply.
pub struct NegotiateUseCase {
    completion_service: Arc<dyn CompletionService>,
}

impl NegotiateUseCase {
    pub fn new(completion_service: Arc<dyn CompletionService>) -> Self {
        Self { completion_service }
    }

    /// Submit `prompt` within `conversation`.
    ///
    /// Blank prompts are rejected with `InvalidInput` and leave the
    /// conversation untouched. Otherwise the user message is appended, and
    /// then either the advice or an `"Error: ..."` entry. Failures are also
    /// returned so the caller can decide whether to retry.
    pub async fn execute(
        &self,
        conversation: &mut Conversation,
        prompt: &str,
    ) -> Result<String, DomainError> {
        ensure_prompt(prompt)?;

        let request = conversation.submit(prompt);
        info!(
            "Requesting advice from {} (persona={}, scenario={}, images={})",
            self.completion_service.model_name(),
            request.persona(),
            request.scenario(),
            request.images().len()
        );

        match self.completion_service.complete(&request).await {
            Ok(text) => {
                debug!("Received {} characters of advice", text.len());
                conversation.push(ChatMessage::assistant(text.clone()));
                Ok(text)
            }
            Err(e) => {
                warn!("Completion failed ({}): {}", e.kind(), e);
                conversation.push(ChatMessage::failure(&e));
                Err(e.into())
            }
        }
    }

    /// One-shot variant without session state.
    pub async fn ask(&self, request: &NegotiationRequest) -> Result<String, DomainError> {
        ensure_prompt(request.prompt_text())?;
        Ok(self.completion_service.complete(request).await?)
    }
}

fn ensure_prompt(prompt: &str) -> Result<(), DomainError> {
    if prompt.trim().is_empty() {
        return Err(DomainError::invalid_input("prompt must not be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CompletionError, CompletionResult, ErrorKind};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct ScriptedService {
        reply: CompletionResult,
        calls: AtomicUsize,
    }

    impl ScriptedService {
        fn new(reply: CompletionResult) -> Arc<Self> {
            Arc::new(Self {
                reply,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl CompletionService for ScriptedService {
        async fn complete(&self, _request: &NegotiationRequest) -> CompletionResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.clone()
        }

        fn model_name(&self) -> &str {
            "scripted"
        }
    }

    #[tokio::test]
    async fn test_blank_prompt_never_reaches_service() {
        let service = ScriptedService::new(Ok("unused".into()));
        let use_case = NegotiateUseCase::new(service.clone());
        let mut conversation = Conversation::new("The Diplomat");

        let err = use_case.execute(&mut conversation, " \n\t ").await.unwrap_err();

        assert!(err.is_invalid_input());
        assert!(conversation.is_empty());
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_success_appends_user_and_reply() {
        let service = ScriptedService::new(Ok("Anchor high.".into()));
        let use_case = NegotiateUseCase::new(service.clone());
        let mut conversation = Conversation::new("The Dealmaker");

        let reply = use_case
            .execute(&mut conversation, "Salary talk tomorrow")
            .await
            .unwrap();

        assert_eq!(reply, "Anchor high.");
        assert_eq!(conversation.len(), 2);
        assert!(conversation.messages()[0].is_from_user());
        assert_eq!(conversation.messages()[1].content(), "Anchor high.");
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failure_is_recorded_as_error_entry() {
        let service = ScriptedService::new(Err(CompletionError::Api("rate limited".into())));
        let use_case = NegotiateUseCase::new(service);
        let mut conversation = Conversation::new("The Diplomat");

        let err = use_case
            .execute(&mut conversation, "Help me")
            .await
            .unwrap_err();

        assert_eq!(err.completion_kind(), Some(ErrorKind::ApiError));
        let last = conversation.last().unwrap();
        assert!(!last.is_from_user());
        assert_eq!(last.content(), "Error: API error: rate limited");
    }

    #[tokio::test]
    async fn test_ask_validates_prompt() {
        let service = ScriptedService::new(Ok("ok".into()));
        let use_case = NegotiateUseCase::new(service.clone());

        let blank = NegotiationRequest::new("The Diplomat", "Contract Dispute", "   ");
        assert!(use_case.ask(&blank).await.unwrap_err().is_invalid_input());

        let valid = NegotiationRequest::new("The Diplomat", "Contract Dispute", "Go");
        assert_eq!(use_case.ask(&valid).await.unwrap(), "ok");
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
    }
}
