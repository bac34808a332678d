use serde::{Deserialize, Serialize};

use super::Metadata;

/// A document handed to an index at ingestion time.
///
/// The shape is decided once here; nothing downstream inspects it again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Document {
    WithMetadata {
        content: String,
        #[serde(default)]
        metadata: Metadata,
    },
    Raw(String),
}

impl Document {
    pub fn content(&self) -> &str {
        match self {
            Self::Raw(content) | Self::WithMetadata { content, .. } => content,
        }
    }

    pub fn into_parts(self) -> (String, Metadata) {
        match self {
            Self::Raw(content) => (content, Metadata::new()),
            Self::WithMetadata { content, metadata } => (content, metadata),
        }
    }
}

impl From<String> for Document {
    fn from(content: String) -> Self {
        Self::Raw(content)
    }
}

impl From<&str> for Document {
    fn from(content: &str) -> Self {
        Self::Raw(content.to_string())
    }
}
