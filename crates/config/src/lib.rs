//! Configuration management for the stylist chat
//!
//! Supports loading configuration from:
//! - TOML files
//! - Environment variables (`STYLIST_` prefix)
//!
//! Also carries static market data (the brand/gender table) and the agent's
//! prompt and message texts.

pub mod brands;
pub mod prompts;
pub mod settings;

pub use brands::BrandGenderSets;
pub use settings::{
    load_settings, CatalogConfig, OpenAiConfig, ServerConfig, SessionConfig, Settings,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
