//! Dialogue orchestrator
//!
//! Per inbound message: append to history, ask the model, maybe force a
//! search retry, run the catalog pipeline when a search fires, persist the
//! final assistant turn. Catalog failures and malformed tool invocations are
//! recovered; only a failing model collaborator is fatal to the request.

use std::sync::Arc;

use stylist_catalog::{filter_and_rank, filter_by_brand_gender, CatalogSearch};
use stylist_config::prompts;
use stylist_config::BrandGenderSets;
use stylist_core::{CatalogItem, PreferenceQuery, Turn};
use stylist_llm::{ChatModel, ModelReply, ToolInvocation, RECOMMEND_TOOL};

use crate::session::SessionStore;
use crate::triggers;
use crate::AgentError;

/// Result of one handled message.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatOutcome {
    pub session_id: String,
    pub assistant: String,
    pub products: Vec<CatalogItem>,
}

pub struct StylistAgent {
    model: Arc<dyn ChatModel>,
    catalog: Arc<dyn CatalogSearch>,
    sessions: Arc<dyn SessionStore>,
    brands: BrandGenderSets,
}

impl StylistAgent {
    pub fn new(
        model: Arc<dyn ChatModel>,
        catalog: Arc<dyn CatalogSearch>,
        sessions: Arc<dyn SessionStore>,
        brands: BrandGenderSets,
    ) -> Self {
        Self {
            model,
            catalog,
            sessions,
            brands,
        }
    }

    /// Handle one inbound user message for a session.
    pub async fn handle_message(
        &self,
        session_id: Option<&str>,
        message: &str,
    ) -> Result<ChatOutcome, AgentError> {
        let session_id = match session_id {
            Some(id) if !id.trim().is_empty() => id.to_string(),
            _ => uuid::Uuid::new_v4().to_string(),
        };
        let message = message.trim();

        // Empty message: fixed opening prompt, no collaborator contact,
        // history untouched.
        if message.is_empty() {
            return Ok(ChatOutcome {
                session_id,
                assistant: prompts::GREETING.to_string(),
                products: Vec::new(),
            });
        }

        let mut history = self.sessions.get(&session_id).await;
        history.push(Turn::user(message));

        let mut reply = self.call_model(&history, false).await?;

        // Forced-search heuristic: the model kept conversing but the user
        // explicitly asked to see options.
        if !reply.is_invocation() && triggers::wants_results(message) {
            match self.call_model(&history, true).await {
                Ok(second) if second.is_invocation() => reply = second,
                Ok(_) => {}
                Err(err) => {
                    tracing::warn!(error = %err, "forced search retry failed, keeping first reply");
                }
            }
        }

        let (mut assistant, products) = match reply {
            ModelReply::Text(text) => (text, Vec::new()),
            ModelReply::Invocation { text, call } => self.run_search(text, call).await,
        };

        if assistant.trim().is_empty() {
            assistant = prompts::FALLBACK_REPLY.to_string();
        }
        history.push(Turn::assistant(&assistant));
        self.sessions.put(&session_id, history).await;

        Ok(ChatOutcome {
            session_id,
            assistant,
            products,
        })
    }

    async fn call_model(&self, history: &[Turn], force: bool) -> Result<ModelReply, AgentError> {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(Turn::system(prompts::SYSTEM_PROMPT));
        messages.extend_from_slice(history);
        if force {
            messages.push(Turn::system(prompts::FORCED_SEARCH_INSTRUCTION));
        }
        Ok(self.model.chat(&messages).await?)
    }

    /// Act on a tool invocation. Degrades to "no search" on anything
    /// malformed; catalog failures become an apologetic reply.
    async fn run_search(
        &self,
        text: String,
        call: ToolInvocation,
    ) -> (String, Vec<CatalogItem>) {
        if call.name != RECOMMEND_TOOL {
            tracing::warn!(tool = %call.name, "unknown tool invocation, ignoring");
            return (text, Vec::new());
        }

        let query: PreferenceQuery = serde_json::from_value(call.args).unwrap_or_default();
        if !query.has_category() {
            tracing::warn!("tool invocation without category, skipping search");
            return (text, Vec::new());
        }

        let assistant = if text.trim().is_empty() {
            prompts::SEARCH_ACK.to_string()
        } else {
            text
        };

        match self.catalog.search(&query).await {
            Ok(results) if !results.is_empty() => {
                let total = results.len();
                let by_gender =
                    filter_by_brand_gender(results, query.gender(), &self.brands);
                let ranked = filter_and_rank(&by_gender, &query);
                tracing::info!(
                    total,
                    by_gender = by_gender.len(),
                    ranked = ranked.len(),
                    "catalog results filtered"
                );
                // price/color may have emptied the list; at least respect gender
                let products = if ranked.is_empty() { by_gender } else { ranked };
                (assistant, products)
            }
            Ok(_) => {
                tracing::info!("catalog returned no results");
                (prompts::NO_RESULTS_APOLOGY.to_string(), Vec::new())
            }
            Err(err) => {
                tracing::warn!(error = %err, "catalog call failed");
                (prompts::NO_RESULTS_APOLOGY.to_string(), Vec::new())
            }
        }
    }
}
