use std::fmt;

use async_trait::async_trait;
use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::{self, Deserializer, IgnoredAny, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::application::CompletionService;
use crate::connector::adapter::{JpegImageEncoder, RetryPolicy};
use crate::domain::{
    CompletionConfig, CompletionError, CompletionResult, DomainError, NegotiationRequest,
};

const COMPLETIONS_PATH: &str = "/chat/completions";
const MAX_TOKENS: u32 = 1000;
const TEMPERATURE: f64 = 0.7;
const TOP_P: f64 = 0.95;
const FREQUENCY_PENALTY: f64 = 0.5;
const PRESENCE_PENALTY: f64 = 0.5;

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: Vec<ApiMessage<'a>>,
    max_tokens: u32,
    temperature: f64,
    top_p: f64,
    frequency_penalty: f64,
    presence_penalty: f64,
}

#[derive(Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: MessageContent<'a>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum MessageContent<'a> {
    Text(String),
    Parts(Vec<ContentPart<'a>>),
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

/// The two response shapes we accept. `Failure` is tried first, so a body
/// carrying both `error.message` and `choices` is reported as an API error.
#[derive(Deserialize)]
#[serde(untagged)]
enum ApiResponse {
    Failure {
        error: ApiErrorBody,
    },
    Success {
        #[serde(deserialize_with = "first_choice")]
        choices: Choice,
    },
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Reads only `choices[0]`; later entries are skipped without validation.
fn first_choice<'de, D>(deserializer: D) -> Result<Choice, D::Error>
where
    D: Deserializer<'de>,
{
    struct FirstChoice;

    impl<'de> Visitor<'de> for FirstChoice {
        type Value = Choice;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a non-empty array of choices")
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Choice, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let first = seq
                .next_element::<Choice>()?
                .ok_or_else(|| de::Error::invalid_length(0, &self))?;
            while seq.next_element::<IgnoredAny>()?.is_some() {}
            Ok(first)
        }
    }

    deserializer.deserialize_seq(FirstChoice)
}

/// HTTP client for OpenAI-style `/chat/completions` endpoints with vision
/// support (the AI/ML API by default).
///
/// Implements [`CompletionService`]. The client only holds immutable
/// configuration and a pooled `reqwest::Client`, so one instance can serve
/// any number of concurrent calls behind an `Arc`. Dropping a pending
/// `complete` future abandons the request; nothing is delivered afterward.
///
/// ```text
/// AIML_API_KEY=...            (required)
/// AIML_BASE_URL=https://api.aimlapi.com
/// AIML_MODEL=meta-llama/Llama-3.2-90B-Vision-Instruct-Turbo
/// ```
pub struct ChatCompletionClient {
    client: reqwest::Client,
    config: CompletionConfig,
    /// Full endpoint URL (base + COMPLETIONS_PATH).
    url: String,
    /// `Bearer <key>`, validated once at construction.
    authorization: HeaderValue,
    image_encoder: JpegImageEncoder,
    retry: RetryPolicy,
}

impl ChatCompletionClient {
    /// Fails with [`CompletionError::InvalidUrl`] when the base URL is not an
    /// absolute http(s) URL, and with [`CompletionError::RequestEncodingFailed`]
    /// when the API key cannot be sent as a header value.
    pub fn new(config: CompletionConfig) -> Result<Self, DomainError> {
        let url = endpoint_url(config.base_url())?;
        let authorization = bearer_header(config.api_key())?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            DomainError::internal(format!("ChatCompletionClient: failed to build HTTP client: {e}"))
        })?;

        let retry = RetryPolicy::new(config.max_retries());
        debug!("ChatCompletionClient configured: {:?}", config);

        Ok(Self {
            client,
            config,
            url,
            authorization,
            image_encoder: JpegImageEncoder::new(),
            retry,
        })
    }

    pub fn from_env() -> Result<Self, DomainError> {
        Self::new(CompletionConfig::from_env()?)
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_image_encoder(mut self, image_encoder: JpegImageEncoder) -> Self {
        self.image_encoder = image_encoder;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.url
    }

    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }

    /// Serialized JSON body for `request`.
    pub fn build_body(&self, request: &NegotiationRequest) -> Result<Vec<u8>, CompletionError> {
        let system_prompt = system_prompt(request.persona(), request.scenario());

        let mut parts = Vec::with_capacity(1 + request.images().len());
        parts.push(ContentPart::Text {
            text: request.prompt_text(),
        });
        for (i, image) in request.images().iter().enumerate() {
            let url = self.image_encoder.to_data_uri(image).map_err(|e| {
                CompletionError::RequestEncodingFailed(format!("image {}: {}", i + 1, e.detail()))
            })?;
            parts.push(ContentPart::ImageUrl {
                image_url: ImageUrl { url },
            });
        }

        let body = ApiRequest {
            model: self.config.model(),
            messages: vec![
                ApiMessage {
                    role: "system",
                    content: MessageContent::Text(system_prompt),
                },
                ApiMessage {
                    role: "user",
                    content: MessageContent::Parts(parts),
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            top_p: TOP_P,
            frequency_penalty: FREQUENCY_PENALTY,
            presence_penalty: PRESENCE_PENALTY,
        };

        serde_json::to_vec(&body)
            .map_err(|e| CompletionError::RequestEncodingFailed(e.to_string()))
    }

    async fn send_once(&self, body: &[u8]) -> CompletionResult {
        let response = self
            .client
            .post(&self.url)
            .header(AUTHORIZATION, self.authorization.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body.to_vec())
            .send()
            .await
            .map_err(|e| {
                if e.is_builder() {
                    CompletionError::RequestEncodingFailed(e.to_string())
                } else {
                    CompletionError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| CompletionError::Network(e.to_string()))?;

        if !status.is_success() {
            warn!(
                "ChatCompletionClient: API returned {status} ({} byte body)",
                bytes.len()
            );
        }

        classify_response(&bytes)
    }
}

#[async_trait]
impl CompletionService for ChatCompletionClient {
    async fn complete(&self, request: &NegotiationRequest) -> CompletionResult {
        let body = self.build_body(request)?;
        debug!(
            "POST {} (model={}, images={}, {} bytes)",
            self.url,
            self.config.model(),
            request.images().len(),
            body.len()
        );

        let body = body.as_slice();
        self.retry.run(move |_| self.send_once(body)).await
    }

    fn model_name(&self) -> &str {
        self.config.model()
    }
}

/// `{base}/chat/completions`, after checking `base` is an absolute http(s) URL.
pub fn endpoint_url(base_url: &str) -> Result<String, CompletionError> {
    let base = base_url.trim();
    let parsed = reqwest::Url::parse(base)
        .map_err(|e| CompletionError::InvalidUrl(format!("{base}: {e}")))?;

    if !matches!(parsed.scheme(), "http" | "https") || parsed.cannot_be_a_base() {
        return Err(CompletionError::InvalidUrl(format!(
            "{base}: expected an http or https URL"
        )));
    }

    Ok(format!("{}{}", base.trim_end_matches('/'), COMPLETIONS_PATH))
}

/// `Authorization` value for `api_key`, marked sensitive so it is never logged.
fn bearer_header(api_key: &str) -> Result<HeaderValue, CompletionError> {
    let mut value = HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|_| {
        CompletionError::RequestEncodingFailed(
            "API key contains characters not allowed in an HTTP header".to_string(),
        )
    })?;
    value.set_sensitive(true);
    Ok(value)
}

/// Instruction naming the persona and scenario and describing the advice wanted.
pub fn system_prompt(persona: &str, scenario: &str) -> String {
    format!(
        "You are an AI assistant specialized in negotiation strategies, taking on the persona of {persona}. \
Your task is to provide expert advice and guidance for the following negotiation scenario: {scenario}.

Consider the following aspects in your response:
1. Analyze the situation from multiple perspectives.
2. Identify key stakeholders and their potential interests.
3. Suggest effective communication strategies.
4. Propose potential win-win solutions.
5. Anticipate possible objections and how to address them.
6. Recommend specific negotiation techniques relevant to this scenario.

If images are provided, analyze them for relevant information that could impact the negotiation strategy.

Respond in a clear, concise manner, organizing your thoughts into distinct sections for easy readability. \
Your goal is to provide actionable advice that can be immediately applied to the negotiation scenario."
    )
}

/// Maps a raw response body onto a [`CompletionResult`].
///
/// Order: empty body, non-JSON or non-object, `error.message`, `choices[0].message.content`.
pub fn classify_response(body: &[u8]) -> CompletionResult {
    if body.is_empty() {
        return Err(CompletionError::NoData);
    }

    let raw = || String::from_utf8_lossy(body).into_owned();

    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|_| CompletionError::MalformedResponse(raw()))?;
    if !value.is_object() {
        return Err(CompletionError::MalformedResponse(raw()));
    }

    match serde_json::from_value::<ApiResponse>(value) {
        Ok(ApiResponse::Failure { error }) => {
            warn!("ChatCompletionClient: API error: {}", error.message);
            Err(CompletionError::Api(error.message))
        }
        Ok(ApiResponse::Success { choices }) => Ok(choices.message.content),
        Err(_) => Err(CompletionError::MalformedResponse(raw())),
    }
}
