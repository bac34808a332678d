//! Resilient conversion of a raw model reply into a `StructuredAnswer`.
//!
//! The cascade is an ordered table of attempt functions. The first to return
//! a value wins; a synthesized answer closes the table, so `parse` is total.
//!
//! | stage              | input                                         |
//! |--------------------|-----------------------------------------------|
//! | direct             | whole reply as JSON                           |
//! | fenced             | each ``` fenced segment                       |
//! | brace span         | first `{` .. last `}`                         |
//! | cleaned brace span | same span, trailing commas and raw newlines fixed |
//! | field recovery     | per-key regexes                               |
//! | last resort        | raw reply as the final answer                 |

pub mod json_text;
mod object;
mod recovery;

use quarry_core::constants::{
    excerpt, DIAGNOSTIC_EXCERPT_CHARS, FORMAT_ANOMALY, NOT_APPLICABLE, PARSE_FAILURE_PREFIX,
};
use quarry_core::models::{FinalAnswer, ParseStage, StructuredAnswer};
use quarry_observability::tracing_setup::events;
use serde_json::Value;

use json_text::{brace_span, clean_json, fenced_segments, parse_value};

/// A parsed answer and the stage that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedAnswer {
    pub answer: StructuredAnswer,
    pub stage: ParseStage,
}

type Attempt = fn(&str) -> Option<StructuredAnswer>;

/// Stages tried in order before the last-resort synthesis.
const STAGES: &[(ParseStage, Attempt)] = &[
    (ParseStage::Direct, direct),
    (ParseStage::Fenced, fenced),
    (ParseStage::BraceSpan, brace),
    (ParseStage::CleanedBraceSpan, cleaned_brace),
    (ParseStage::FieldRecovery, recovery::recover_fields),
];

fn from_json_text(text: &str) -> Option<StructuredAnswer> {
    parse_value(text).and_then(object::structured_from_value)
}

fn direct(text: &str) -> Option<StructuredAnswer> {
    from_json_text(text.trim())
}

fn fenced(text: &str) -> Option<StructuredAnswer> {
    fenced_segments(text).into_iter().find_map(from_json_text)
}

fn brace(text: &str) -> Option<StructuredAnswer> {
    brace_span(text).and_then(from_json_text)
}

fn cleaned_brace(text: &str) -> Option<StructuredAnswer> {
    brace_span(text).and_then(|span| from_json_text(&clean_json(span)))
}

/// Diagnostic analysis text quoting the start of an unparsable reply.
pub(crate) fn parse_failure_analysis(raw: &str) -> String {
    format!(
        "{PARSE_FAILURE_PREFIX}{}",
        excerpt(raw, DIAGNOSTIC_EXCERPT_CHARS)
    )
}

/// Stage 6: an answer built from the raw text alone.
fn last_resort(raw: &str) -> StructuredAnswer {
    StructuredAnswer {
        step_by_step_analysis: parse_failure_analysis(raw),
        reasoning_summary: FORMAT_ANOMALY.to_string(),
        relevant_pages: Vec::new(),
        final_answer: if raw.trim() == NOT_APPLICABLE {
            FinalAnswer::NotAvailable
        } else {
            FinalAnswer::Text(raw.to_string())
        },
    }
}

/// Parse a model reply, reporting which stage succeeded.
pub fn parse_with_stage(raw: &str) -> ParsedAnswer {
    let _span = quarry_observability::parse_span!(raw.len()).entered();

    for &(stage, attempt) in STAGES {
        if let Some(answer) = attempt(raw) {
            if stage.is_anomaly() {
                events::parse_recovered(&stage.to_string(), raw.len());
            }
            return ParsedAnswer { answer, stage };
        }
        tracing::debug!(stage = %stage, "parse stage failed");
    }

    events::parse_recovered(&ParseStage::LastResort.to_string(), raw.len());
    ParsedAnswer {
        answer: last_resort(raw),
        stage: ParseStage::LastResort,
    }
}

/// Parse a model reply. Never fails.
pub fn parse(raw: &str) -> StructuredAnswer {
    parse_with_stage(raw).answer
}

/// Find a JSON value in a reply using the first four stages.
///
/// For callers that expect a shape other than `StructuredAnswer`.
pub fn extract_json_with<T>(
    raw: &str,
    accept: impl Fn(Value) -> Option<T>,
) -> Option<(T, ParseStage)> {
    json_text::extract_json_with(raw, accept)
}
