//! Catalog collaborator and filtering pipeline
//!
//! The recommendation backend is a black box: structured query in, a list
//! of loosely typed catalog records out. Everything downstream of it is
//! deterministic: gender/brand classification, budget and color filtering,
//! boost-then-price ranking.

pub mod brand_filter;
pub mod client;
pub mod rank;

pub use brand_filter::filter_by_brand_gender;
pub use client::{CatalogSearch, RecommendClient};
pub use rank::filter_and_rank;

use thiserror::Error;

/// Catalog collaborator errors. All of them are recoverable: the
/// orchestrator turns them into an apologetic reply, never a failed request.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CatalogError::Timeout
        } else {
            CatalogError::Network(err.to_string())
        }
    }
}
