//! Dialogue orchestration
//!
//! Maintains per-session conversation history, decides turn by turn whether
//! to ask another question or invoke a search, and runs the catalog
//! filtering pipeline over the results.

pub mod agent;
pub mod session;
pub mod triggers;

pub use agent::{ChatOutcome, StylistAgent};
pub use session::{InMemorySessionStore, SessionStore};
pub use triggers::wants_results;

use thiserror::Error;

use stylist_llm::LlmError;

/// Orchestrator errors. Only the model collaborator is fatal to a request;
/// catalog failures and malformed tool arguments are recovered internally.
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("model credentials are not configured")]
    CredentialsMissing,

    #[error("model call failed: {0}")]
    ModelCall(String),
}

impl From<LlmError> for AgentError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::MissingCredentials => AgentError::CredentialsMissing,
            other => AgentError::ModelCall(other.to_string()),
        }
    }
}
