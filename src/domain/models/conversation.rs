use super::{ChatMessage, ImageBlob, NegotiationRequest, DEFAULT_SCENARIO};

/// Session-scoped chat state.
///
/// Messages are append-only: there is no API to remove or edit an entry.
/// The whole value is dropped when the session ends.
#[derive(Debug, Clone)]
pub struct Conversation {
    persona: String,
    scenario: Option<String>,
    pending_images: Vec<ImageBlob>,
    messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new(persona: impl Into<String>) -> Self {
        Self {
            persona: persona.into(),
            scenario: None,
            pending_images: Vec::new(),
            messages: Vec::new(),
        }
    }

    pub fn with_scenario(mut self, scenario: impl Into<String>) -> Self {
        self.select_scenario(scenario);
        self
    }

    pub fn persona(&self) -> &str {
        &self.persona
    }

    pub fn set_persona(&mut self, persona: impl Into<String>) {
        self.persona = persona.into();
    }

    pub fn scenario(&self) -> Option<&str> {
        self.scenario.as_deref()
    }

    pub fn select_scenario(&mut self, scenario: impl Into<String>) {
        let scenario = scenario.into();
        let trimmed = scenario.trim();
        if !trimmed.is_empty() {
            self.scenario = Some(trimmed.to_string());
        }
    }

    /// The scenario to send: the selected one, or [`DEFAULT_SCENARIO`].
    pub fn effective_scenario(&self) -> &str {
        self.scenario.as_deref().unwrap_or(DEFAULT_SCENARIO)
    }

    pub fn attach_image(&mut self, image: ImageBlob) {
        self.pending_images.push(image);
    }

    pub fn pending_images(&self) -> &[ImageBlob] {
        &self.pending_images
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Records a user submission and returns the request to send for it.
    ///
    /// The first submission becomes the scenario when none was selected.
    /// Attached images stay attached for later turns.
    pub fn submit(&mut self, prompt: &str) -> NegotiationRequest {
        if self.scenario.is_none() {
            self.select_scenario(prompt);
        }
        self.messages.push(ChatMessage::user(prompt));

        NegotiationRequest::new(
            self.persona.clone(),
            self.effective_scenario(),
            prompt,
        )
        .with_images(self.pending_images.clone())
    }
}
