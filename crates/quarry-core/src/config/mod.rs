pub mod defaults;
mod llm_config;
mod observability_config;
mod rerank_config;
mod retrieval_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use llm_config::LlmConfig;
pub use observability_config::ObservabilityConfig;
pub use rerank_config::{RerankBackend, RerankConfig};
pub use retrieval_config::RetrievalConfig;

use crate::errors::{QuarryError, QuarryResult};

/// Top-level configuration. Every section falls back to its defaults when absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuarryConfig {
    pub retrieval: RetrievalConfig,
    pub rerank: RerankConfig,
    pub llm: LlmConfig,
    pub observability: ObservabilityConfig,
}

impl QuarryConfig {
    /// Parse configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> QuarryResult<Self> {
        toml::from_str(toml_str).map_err(|e| QuarryError::ConfigError(e.to_string()))
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> QuarryResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| QuarryError::ConfigError(format!("{}: {e}", path.display())))?;
        Self::from_toml(&contents)
    }

    /// Serialize back to TOML.
    pub fn to_toml(&self) -> QuarryResult<String> {
        toml::to_string(self).map_err(|e| QuarryError::ConfigError(e.to_string()))
    }
}
