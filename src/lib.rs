pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{CompletionService, NegotiateUseCase};

pub use cli::Commands;

pub use connector::{
    ChatCompletionClient, Container, ContainerConfig, JpegImageEncoder, MockCompletion,
    RetryPolicy, Router,
};

pub use domain::{
    ChatMessage, CompletionConfig, CompletionError, CompletionResult, Conversation, DomainError,
    ErrorKind, ImageBlob, NegotiationRequest, Persona, ScenarioPreset, DEFAULT_SCENARIO,
};
