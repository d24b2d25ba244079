use async_trait::async_trait;

use crate::domain::{CompletionResult, NegotiationRequest};

/// Produces negotiation advice for a single request.
///
/// Implementors own transport and wire-format details. Every failure is
/// classified into a [`crate::domain::CompletionError`] rather than raised,
/// so callers can always render the outcome.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Resolve exactly once with the assistant text or a classified failure.
    ///
    /// `request.prompt_text()` must be non-empty after trimming; this is not checked here.
    async fn complete(&self, request: &NegotiationRequest) -> CompletionResult;

    /// Get the model identifier requests are sent to
    fn model_name(&self) -> &str;
}
