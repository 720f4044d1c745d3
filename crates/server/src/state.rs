//! Shared application state

use std::sync::Arc;

use stylist_agent::StylistAgent;
use stylist_catalog::CatalogSearch;
use stylist_config::Settings;
use stylist_llm::ChatModel;

#[derive(Clone)]
pub struct AppState {
    pub agent: Arc<StylistAgent>,
    pub model: Arc<dyn ChatModel>,
    pub catalog: Arc<dyn CatalogSearch>,
    pub settings: Arc<Settings>,
}
