use std::fmt;

use serde::{Deserialize, Serialize};

/// The answer shape a question expects. Selects the prompt variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerType {
    /// A single person, title or entity.
    Name,
    /// A quantity, ratio or monetary value.
    Number,
    /// Yes or no.
    Boolean,
    /// A list of names.
    Names,
    /// Free text.
    #[default]
    String,
}

impl AnswerType {
    pub const ALL: [AnswerType; 5] = [
        Self::Name,
        Self::Number,
        Self::Boolean,
        Self::Names,
        Self::String,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Names => "names",
            Self::String => "string",
        }
    }
}

impl fmt::Display for AnswerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
