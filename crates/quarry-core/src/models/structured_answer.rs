use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::NOT_APPLICABLE;

/// The schema-shaped answer extracted from a model reply.
///
/// All four fields are always populated. Serialized with exactly these keys,
/// which is also the form the direct parse stage accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredAnswer {
    pub step_by_step_analysis: String,
    pub reasoning_summary: String,
    pub relevant_pages: Vec<u32>,
    pub final_answer: FinalAnswer,
}

impl StructuredAnswer {
    /// Canonical JSON form.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// The final answer value. `NotAvailable` is the `"N/A"` sentinel.
///
/// Serialized as the bare JSON value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub enum FinalAnswer {
    Text(String),
    Number(serde_json::Number),
    Boolean(bool),
    Names(Vec<String>),
    NotAvailable,
}

impl FinalAnswer {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn is_not_available(&self) -> bool {
        matches!(self, Self::NotAvailable)
    }

    /// True for an empty or whitespace-only text answer.
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(s) if s.trim().is_empty())
    }
}

impl TryFrom<Value> for FinalAnswer {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) if s == NOT_APPLICABLE => Ok(Self::NotAvailable),
            Value::String(s) => Ok(Self::Text(s)),
            Value::Number(n) => Ok(Self::Number(n)),
            Value::Bool(b) => Ok(Self::Boolean(b)),
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s),
                    other => Err(format!("final_answer list holds a non-string: {other}")),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Self::Names),
            Value::Null => Err("final_answer is null".to_string()),
            Value::Object(_) => Err("final_answer is an object".to_string()),
        }
    }
}

impl From<FinalAnswer> for Value {
    fn from(answer: FinalAnswer) -> Self {
        match answer {
            FinalAnswer::Text(s) => Value::String(s),
            FinalAnswer::Number(n) => Value::Number(n),
            FinalAnswer::Boolean(b) => Value::Bool(b),
            FinalAnswer::Names(names) => {
                Value::Array(names.into_iter().map(Value::String).collect())
            }
            FinalAnswer::NotAvailable => Value::String(NOT_APPLICABLE.to_string()),
        }
    }
}

impl fmt::Display for FinalAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Names(names) => f.write_str(&names.join(", ")),
            Self::NotAvailable => f.write_str(NOT_APPLICABLE),
        }
    }
}

/// Which parse stage produced a structured answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseStage {
    Direct,
    Fenced,
    BraceSpan,
    CleanedBraceSpan,
    FieldRecovery,
    LastResort,
}

impl ParseStage {
    /// Whether the reply needed anything beyond a plain JSON parse.
    pub fn is_anomaly(&self) -> bool {
        *self > Self::Fenced
    }
}

impl fmt::Display for ParseStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Direct => "direct",
            Self::Fenced => "fenced",
            Self::BraceSpan => "brace_span",
            Self::CleanedBraceSpan => "cleaned_brace_span",
            Self::FieldRecovery => "field_recovery",
            Self::LastResort => "last_resort",
        };
        f.write_str(name)
    }
}
