//! Language-model collaborator
//!
//! The model is a black box: conversation history in, either a
//! natural-language reply or a structured tool invocation out. This crate
//! provides the `ChatModel` seam, the OpenAI-compatible backend, and the
//! `recommend_products` tool schema.

pub mod backend;
pub mod tools;

pub use backend::{ChatModel, OpenAiBackend};
pub use tools::{recommend_products_schema, ModelReply, ToolInvocation, RECOMMEND_TOOL};

use thiserror::Error;

/// LLM errors
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("API key is not configured")]
    MissingCredentials,

    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout
        } else {
            LlmError::Network(err.to_string())
        }
    }
}
