//! OpenAI-compatible chat backend
//!
//! Speaks `/v1/chat/completions` with the `recommend_products` tool
//! declared, auto tool selection, and at most one tool call per turn.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use stylist_config::OpenAiConfig;
use stylist_core::Turn;

use crate::tools::{recommend_products_schema, ModelReply, ToolInvocation};
use crate::LlmError;

/// Seam for the model collaborator.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// One chat completion over the given role-tagged messages.
    async fn chat(&self, messages: &[Turn]) -> Result<ModelReply, LlmError>;

    /// Whether a credential is configured at all (health reporting).
    fn has_credentials(&self) -> bool;
}

pub struct OpenAiBackend {
    client: Client,
    config: OpenAiConfig,
    api_key: Option<String>,
}

impl OpenAiBackend {
    pub fn new(config: OpenAiConfig) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| LlmError::Network(format!("failed to create HTTP client: {e}")))?;
        let api_key = config.resolved_api_key();

        Ok(Self {
            client,
            config,
            api_key,
        })
    }
}

#[async_trait]
impl ChatModel for OpenAiBackend {
    async fn chat(&self, messages: &[Turn]) -> Result<ModelReply, LlmError> {
        let api_key = self.api_key.as_ref().ok_or(LlmError::MissingCredentials)?;

        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            temperature: self.config.temperature,
            messages: messages.iter().map(WireMessage::from).collect(),
            tools: vec![recommend_products_schema()],
            tool_choice: "auto",
            parallel_tool_calls: false,
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, "model call failed");
            return Err(LlmError::Api(format!("{status}: {body}")));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        parse_reply(completion)
    }

    fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }
}

fn parse_reply(completion: ChatCompletionResponse) -> Result<ModelReply, LlmError> {
    let choice = completion
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::InvalidResponse("no choices in completion".to_string()))?;

    let text = choice.message.content.unwrap_or_default();
    let call = choice
        .message
        .tool_calls
        .unwrap_or_default()
        .into_iter()
        .next()
        .map(|tc| ToolInvocation {
            name: tc.function.name,
            // malformed argument blobs degrade to an empty object
            args: serde_json::from_str(&tc.function.arguments)
                .unwrap_or_else(|_| serde_json::json!({})),
        });

    Ok(match call {
        Some(call) => ModelReply::Invocation { text, call },
        None => ModelReply::Text(text),
    })
}

// Wire types

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    temperature: f32,
    messages: Vec<WireMessage>,
    tools: Vec<serde_json::Value>,
    tool_choice: &'static str,
    parallel_tool_calls: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireMessage {
    role: String,
    content: String,
}

impl From<&Turn> for WireMessage {
    fn from(turn: &Turn) -> Self {
        Self {
            role: turn.role.to_string(),
            content: turn.content.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<WireToolCall>>,
}

#[derive(Debug, Deserialize)]
struct WireToolCall {
    function: WireFunction,
}

#[derive(Debug, Deserialize)]
struct WireFunction {
    name: String,
    /// JSON-encoded argument object, as the API delivers it.
    arguments: String,
}
