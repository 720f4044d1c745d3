//! End-to-end orchestration scenarios with scripted collaborators.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::json;

use stylist_agent::{AgentError, ChatOutcome, InMemorySessionStore, SessionStore, StylistAgent};
use stylist_catalog::{CatalogError, CatalogSearch};
use stylist_config::{prompts, BrandGenderSets};
use stylist_core::{CatalogItem, PreferenceQuery, Turn, TurnRole};
use stylist_llm::{ChatModel, LlmError, ModelReply, ToolInvocation, RECOMMEND_TOOL};

struct ScriptedModel {
    replies: Mutex<VecDeque<Result<ModelReply, LlmError>>>,
    seen: Mutex<Vec<Vec<Turn>>>,
}

impl ScriptedModel {
    fn new(replies: Vec<Result<ModelReply, LlmError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            seen: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.seen.lock().len()
    }

    fn messages_of_call(&self, index: usize) -> Vec<Turn> {
        self.seen.lock()[index].clone()
    }
}

#[async_trait]
impl ChatModel for ScriptedModel {
    async fn chat(&self, messages: &[Turn]) -> Result<ModelReply, LlmError> {
        self.seen.lock().push(messages.to_vec());
        self.replies
            .lock()
            .pop_front()
            .unwrap_or(Ok(ModelReply::Text("?".to_string())))
    }

    fn has_credentials(&self) -> bool {
        true
    }
}

struct ScriptedCatalog {
    results: Mutex<Option<Result<Vec<CatalogItem>, CatalogError>>>,
    calls: AtomicUsize,
    last_query: Mutex<Option<PreferenceQuery>>,
}

impl ScriptedCatalog {
    fn returning(result: Result<Vec<CatalogItem>, CatalogError>) -> Arc<Self> {
        Arc::new(Self {
            results: Mutex::new(Some(result)),
            calls: AtomicUsize::new(0),
            last_query: Mutex::new(None),
        })
    }

    fn unused() -> Arc<Self> {
        Self::returning(Ok(Vec::new()))
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogSearch for ScriptedCatalog {
    async fn search(&self, query: &PreferenceQuery) -> Result<Vec<CatalogItem>, CatalogError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock() = Some(query.clone());
        self.results
            .lock()
            .take()
            .unwrap_or(Ok(Vec::new()))
    }

    async fn is_healthy(&self) -> bool {
        true
    }
}

fn agent_with(
    model: Arc<ScriptedModel>,
    catalog: Arc<ScriptedCatalog>,
) -> (StylistAgent, Arc<InMemorySessionStore>) {
    let sessions = Arc::new(InMemorySessionStore::new(Duration::from_secs(60)));
    let agent = StylistAgent::new(
        model,
        catalog,
        sessions.clone() as Arc<dyn SessionStore>,
        BrandGenderSets::default(),
    );
    (agent, sessions)
}

fn invocation(args: serde_json::Value) -> ModelReply {
    ModelReply::Invocation {
        text: String::new(),
        call: ToolInvocation {
            name: RECOMMEND_TOOL.to_string(),
            args,
        },
    }
}

fn item(value: serde_json::Value) -> CatalogItem {
    serde_json::from_value(value).unwrap()
}

#[tokio::test]
async fn empty_message_returns_greeting_without_collaborators() {
    let model = ScriptedModel::new(vec![]);
    let catalog = ScriptedCatalog::unused();
    let (agent, sessions) = agent_with(model.clone(), catalog.clone());

    let outcome = agent.handle_message(Some("s1"), "   ").await.unwrap();

    assert_eq!(outcome.assistant, prompts::GREETING);
    assert!(outcome.products.is_empty());
    assert_eq!(model.calls(), 0);
    assert_eq!(catalog.calls(), 0);
    // history untouched
    assert!(sessions.get("s1").await.is_empty());
}

#[tokio::test]
async fn trigger_phrase_without_category_makes_no_catalog_call() {
    // first reply converses; forced retry extracts, but still no category
    let model = ScriptedModel::new(vec![
        Ok(ModelReply::Text("¿Qué categoría buscás?".to_string())),
        Ok(invocation(json!({ "gender": "hombre" }))),
    ]);
    let catalog = ScriptedCatalog::unused();
    let (agent, _) = agent_with(model.clone(), catalog.clone());

    let outcome = agent
        .handle_message(Some("s1"), "mostrame opciones")
        .await
        .unwrap();

    assert_eq!(model.calls(), 2);
    assert_eq!(catalog.calls(), 0);
    assert!(outcome.products.is_empty());

    // the retry carries the extra system instruction at the end
    let retry = model.messages_of_call(1);
    let last = retry.last().unwrap();
    assert_eq!(last.role, TurnRole::System);
    assert_eq!(last.content, prompts::FORCED_SEARCH_INSTRUCTION);
}

#[tokio::test]
async fn budget_and_color_filters_apply_then_sort_ascending() {
    let model = ScriptedModel::new(vec![Ok(invocation(json!({
        "category": "remeras",
        "budget_max": 200.0,
        "colors_avoid": "rojo"
    })))]);
    let catalog = ScriptedCatalog::returning(Ok(vec![
        item(json!({ "name": "cara", "price": 500 })),
        item(json!({ "name": "media", "price": 150 })),
        item(json!({ "name": "carisima", "price": 900 })),
        item(json!({ "name": "roja", "price": 100, "colors": ["rojo"] })),
        item(json!({ "name": "barata", "price": 50 })),
    ]));
    let (agent, _) = agent_with(model, catalog.clone());

    let outcome = agent.handle_message(Some("s1"), "dale").await.unwrap();

    assert_eq!(catalog.calls(), 1);
    let names: Vec<&str> = outcome.products.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["barata", "media"]);
    assert_eq!(outcome.assistant, prompts::SEARCH_ACK);
}

#[tokio::test]
async fn gender_filter_runs_before_price_and_color() {
    let model = ScriptedModel::new(vec![Ok(invocation(json!({
        "category": "camisas",
        "gender": "hombre"
    })))]);
    // kosiuko is women-exclusive in the default table; it would pass every
    // other filter
    let catalog = ScriptedCatalog::returning(Ok(vec![
        item(json!({ "name": "camisa kosiuko", "brand": "Kosiuko", "price": 10 })),
        item(json!({ "name": "camisa bowen", "brand": "Bowen", "price": 20 })),
    ]));
    let (agent, _) = agent_with(model, catalog);

    let outcome = agent.handle_message(Some("s1"), "dale").await.unwrap();

    let names: Vec<&str> = outcome.products.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["camisa bowen"]);
}

#[tokio::test]
async fn catalog_timeout_recovers_with_apology() {
    let model = ScriptedModel::new(vec![Ok(invocation(json!({ "category": "vestidos" })))]);
    let catalog = ScriptedCatalog::returning(Err(CatalogError::Timeout));
    let (agent, _) = agent_with(model, catalog);

    let outcome = agent.handle_message(Some("s1"), "dale").await.unwrap();

    assert_eq!(outcome.assistant, prompts::NO_RESULTS_APOLOGY);
    assert!(outcome.products.is_empty());
}

#[tokio::test]
async fn all_filtered_out_falls_back_to_gender_filtered_set() {
    let model = ScriptedModel::new(vec![Ok(invocation(json!({
        "category": "remeras",
        "gender": "mujer",
        "budget_max": 10.0
    })))]);
    let catalog = ScriptedCatalog::returning(Ok(vec![
        item(json!({ "name": "prune", "brand": "prune", "price": 500 })),
        item(json!({ "name": "bowen", "brand": "bowen", "price": 500 })),
    ]));
    let (agent, _) = agent_with(model, catalog);

    let outcome = agent.handle_message(Some("s1"), "dale").await.unwrap();

    // budget removed everything; show the gender-respecting set instead
    let names: Vec<&str> = outcome.products.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["prune"]);
}

#[tokio::test]
async fn unknown_tool_name_degrades_to_plain_reply() {
    let model = ScriptedModel::new(vec![Ok(ModelReply::Invocation {
        text: "dale".to_string(),
        call: ToolInvocation {
            name: "otra_cosa".to_string(),
            args: json!({ "category": "remeras" }),
        },
    })]);
    let catalog = ScriptedCatalog::unused();
    let (agent, _) = agent_with(model, catalog.clone());

    let outcome = agent.handle_message(Some("s1"), "hola").await.unwrap();

    assert_eq!(catalog.calls(), 0);
    assert_eq!(outcome.assistant, "dale");
}

#[tokio::test]
async fn history_accumulates_and_persists() {
    let model = ScriptedModel::new(vec![
        Ok(ModelReply::Text("¿Para qué ocasión?".to_string())),
        Ok(ModelReply::Text("¿Algún color preferido?".to_string())),
    ]);
    let catalog = ScriptedCatalog::unused();
    let (agent, sessions) = agent_with(model.clone(), catalog);

    agent.handle_message(Some("s1"), "hola").await.unwrap();
    agent.handle_message(Some("s1"), "casual").await.unwrap();

    let history = sessions.get("s1").await;
    let contents: Vec<&str> = history.iter().map(|t| t.content.as_str()).collect();
    assert_eq!(
        contents,
        vec!["hola", "¿Para qué ocasión?", "casual", "¿Algún color preferido?"]
    );

    // second model call replays the full history after the system prompt
    let second = model.messages_of_call(1);
    assert_eq!(second[0].role, TurnRole::System);
    assert_eq!(second.len(), 4); // system + 3 history turns
}

#[tokio::test]
async fn missing_session_id_generates_one() {
    let model = ScriptedModel::new(vec![Ok(ModelReply::Text("hola".to_string()))]);
    let (agent, sessions) = agent_with(model, ScriptedCatalog::unused());

    let outcome = agent.handle_message(None, "hola").await.unwrap();

    assert!(!outcome.session_id.is_empty());
    assert_eq!(sessions.get(&outcome.session_id).await.len(), 2);
}

#[tokio::test]
async fn empty_assistant_text_falls_back_to_smiley() {
    let model = ScriptedModel::new(vec![Ok(ModelReply::Text(String::new()))]);
    let (agent, _) = agent_with(model, ScriptedCatalog::unused());

    let outcome = agent.handle_message(Some("s1"), "hola").await.unwrap();
    assert_eq!(outcome.assistant, prompts::FALLBACK_REPLY);
}

#[tokio::test]
async fn missing_credentials_surface_as_fatal() {
    let model = ScriptedModel::new(vec![Err(LlmError::MissingCredentials)]);
    let (agent, _) = agent_with(model, ScriptedCatalog::unused());

    let err = agent.handle_message(Some("s1"), "hola").await.unwrap_err();
    assert!(matches!(err, AgentError::CredentialsMissing));
}

#[tokio::test]
async fn forced_retry_failure_keeps_first_reply() {
    let model = ScriptedModel::new(vec![
        Ok(ModelReply::Text("¿Qué talle usás?".to_string())),
        Err(LlmError::Timeout),
    ]);
    let (agent, _) = agent_with(model.clone(), ScriptedCatalog::unused());

    let outcome: ChatOutcome = agent
        .handle_message(Some("s1"), "ver productos")
        .await
        .unwrap();

    assert_eq!(model.calls(), 2);
    assert_eq!(outcome.assistant, "¿Qué talle usás?");
}
