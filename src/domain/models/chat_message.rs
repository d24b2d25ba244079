use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::CompletionError;

/// One entry in a conversation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    id: Uuid,
    content: String,
    is_from_user: bool,
}

impl ChatMessage {
    pub fn new(content: impl Into<String>, is_from_user: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            is_from_user,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(content, true)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(content, false)
    }

    /// Assistant-side entry describing a failed completion.
    pub fn failure(error: &CompletionError) -> Self {
        Self::new(format!("Error: {error}"), false)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_from_user(&self) -> bool {
        self.is_from_user
    }

    pub fn speaker(&self) -> &'static str {
        if self.is_from_user {
            "You"
        } else {
            "Advisor"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = ChatMessage::user("hello");
        let b = ChatMessage::user("hello");
        assert_ne!(a.id(), b.id());
        assert_eq!(a.content(), b.content());
    }

    #[test]
    fn test_failure_message_content() {
        let msg = ChatMessage::failure(&CompletionError::Api("rate limited".into()));
        assert!(!msg.is_from_user());
        assert_eq!(msg.content(), "Error: API error: rate limited");
        assert_eq!(msg.speaker(), "Advisor");
    }
}
