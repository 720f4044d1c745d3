//! Runtime settings
//!
//! Layered: defaults, then an optional TOML file, then `STYLIST_`-prefixed
//! environment variables (double underscore as separator, e.g.
//! `STYLIST_SERVER__PORT=9000`). The OpenAI key additionally falls back to
//! the conventional `OPENAI_API_KEY` variable.

use std::time::Duration;

use serde::Deserialize;

use crate::brands::BrandGenderSets;
use crate::ConfigError;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerConfig,
    pub openai: OpenAiConfig,
    pub catalog: CatalogConfig,
    pub session: SessionConfig,
    /// Per-market brand/gender table override.
    pub brands: BrandGenderSets,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_enabled: bool,
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_enabled: false,
            cors_origins: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    /// API key; falls back to the `OPENAI_API_KEY` environment variable.
    pub api_key: Option<String>,
    pub endpoint: String,
    pub model: String,
    pub temperature: f32,
    pub timeout_secs: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.5,
            timeout_secs: 45,
        }
    }
}

impl OpenAiConfig {
    /// Resolve the credential: explicit setting first, then the environment.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub recommend_url: String,
    pub timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            recommend_url: "https://zoppa-api-chat.onrender.com/api/recommend".to_string(),
            timeout_secs: 45,
        }
    }
}

impl CatalogConfig {
    /// Health probe URL: the sibling `/health` of the recommend endpoint.
    pub fn health_url(&self) -> String {
        match self.recommend_url.strip_suffix("/api/recommend") {
            Some(base) => format!("{base}/health"),
            None => format!("{}/health", self.recommend_url.trim_end_matches('/')),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Idle time-to-live; refreshed on each write.
    pub ttl_secs: u64,
    /// Interval between background sweeps of expired sessions.
    pub cleanup_interval_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 30 * 60,
            cleanup_interval_secs: 5 * 60,
        }
    }
}

impl SessionConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_secs)
    }
}

/// Load settings from an optional file plus the environment.
pub fn load_settings(path: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(config::File::with_name(path).required(false));
    }
    let loaded = builder
        .add_source(
            config::Environment::with_prefix("STYLIST")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;
    let settings = loaded.try_deserialize()?;
    Ok(settings)
}
