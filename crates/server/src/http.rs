//! HTTP endpoints
//!
//! The inbound surface consumed by the chat widget:
//! - `POST /api/message` — one chat turn in, assistant text + products out
//! - `GET /api/ping` — credential and catalog reachability check

use axum::{
    extract::{Json, State},
    http::{HeaderValue, Method, StatusCode},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use stylist_agent::AgentError;
use stylist_core::CatalogItem;

use crate::render::products_html;
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors_layer = build_cors_layer(
        &state.settings.server.cors_origins,
        state.settings.server.cors_enabled,
    );

    Router::new()
        .route("/api/message", post(message))
        .route("/api/ping", get(ping))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(state)
}

fn build_cors_layer(origins: &[String], enabled: bool) -> CorsLayer {
    if !enabled {
        return CorsLayer::permissive();
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "invalid CORS origin, skipping");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(parsed)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub session_id: String,
    pub assistant: String,
    pub products: Vec<CatalogItem>,
    pub products_html: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

async fn message(
    State(state): State<AppState>,
    Json(request): Json<MessageRequest>,
) -> Result<Json<MessageResponse>, (StatusCode, Json<ErrorResponse>)> {
    let outcome = state
        .agent
        .handle_message(request.session_id.as_deref(), &request.message)
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "message handling failed");
            let status = match err {
                AgentError::CredentialsMissing | AgentError::ModelCall(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            (
                status,
                Json(ErrorResponse {
                    error: err.to_string(),
                }),
            )
        })?;

    let products_html = products_html(&outcome.products);
    Ok(Json(MessageResponse {
        session_id: outcome.session_id,
        assistant: outcome.assistant,
        products: outcome.products,
        products_html,
    }))
}

#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub ok: bool,
    pub openai_key: bool,
    pub catalog_health: bool,
}

async fn ping(State(state): State<AppState>) -> Json<PingResponse> {
    Json(PingResponse {
        ok: true,
        openai_key: state.model.has_credentials(),
        catalog_health: state.catalog.is_healthy().await,
    })
}
