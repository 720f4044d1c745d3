//! Recommendation service client
//!
//! POSTs a flat query mirroring the tool-argument field names and expects a
//! `{ "results": [...] }` envelope. Missing item fields are tolerated by the
//! `CatalogItem` type itself.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use stylist_config::CatalogConfig;
use stylist_core::{CatalogItem, PreferenceQuery};

use crate::CatalogError;

/// Seam for the catalog collaborator.
#[async_trait]
pub trait CatalogSearch: Send + Sync {
    async fn search(&self, query: &PreferenceQuery) -> Result<Vec<CatalogItem>, CatalogError>;

    /// Health probe for the ping endpoint.
    async fn is_healthy(&self) -> bool;
}

pub struct RecommendClient {
    client: Client,
    config: CatalogConfig,
}

impl RecommendClient {
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| CatalogError::Network(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl CatalogSearch for RecommendClient {
    async fn search(&self, query: &PreferenceQuery) -> Result<Vec<CatalogItem>, CatalogError> {
        let payload = SearchPayload::from(query);
        let response = self
            .client
            .post(&self.config.recommend_url)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!(%status, "catalog call failed");
            return Err(CatalogError::Api(status.to_string()));
        }

        let envelope: RecommendResponse = response
            .json()
            .await
            .map_err(|e| CatalogError::InvalidResponse(e.to_string()))?;
        Ok(envelope.results)
    }

    async fn is_healthy(&self) -> bool {
        self.client
            .get(self.config.health_url())
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }
}

/// Flat wire query. All strings; the budget goes out as free text, the
/// numeric ceiling is applied locally after results come back.
#[derive(Debug, Serialize)]
struct SearchPayload<'a> {
    gender: &'a str,
    occasion: &'a str,
    category: &'a str,
    style: &'a str,
    fit: &'a str,
    brand_pref: &'a str,
    brand_avoid: &'a str,
    colors_pref: &'a str,
    colors_avoid: &'a str,
    sizes: &'a str,
    budget: &'a str,
    notes: &'a str,
}

impl<'a> From<&'a PreferenceQuery> for SearchPayload<'a> {
    fn from(q: &'a PreferenceQuery) -> Self {
        Self {
            gender: &q.gender,
            occasion: &q.occasion,
            category: &q.category,
            style: &q.style,
            fit: &q.fit,
            brand_pref: &q.brand_pref,
            brand_avoid: &q.brand_avoid,
            colors_pref: &q.colors_pref,
            colors_avoid: &q.colors_avoid,
            sizes: &q.sizes,
            budget: &q.budget,
            notes: &q.notes,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RecommendResponse {
    #[serde(default)]
    results: Vec<CatalogItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_mirrors_query_fields_without_budget_max() {
        let query = PreferenceQuery {
            category: "camisas".into(),
            gender: "hombre".into(),
            budget: "30000-120000".into(),
            budget_max: Some(120000.0),
            ..Default::default()
        };
        let json = serde_json::to_value(SearchPayload::from(&query)).unwrap();
        assert_eq!(json["category"], "camisas");
        assert_eq!(json["gender"], "hombre");
        assert_eq!(json["budget"], "30000-120000");
        assert!(json.get("budget_max").is_none());
    }

    #[test]
    fn response_envelope_tolerates_missing_results() {
        let envelope: RecommendResponse = serde_json::from_str("{}").unwrap();
        assert!(envelope.results.is_empty());

        let envelope: RecommendResponse =
            serde_json::from_str(r#"{"results":[{"name":"Camisa"}]}"#).unwrap();
        assert_eq!(envelope.results.len(), 1);
        assert_eq!(envelope.results[0].name, "Camisa");
    }
}
