//! Field-by-field recovery from text that is not valid JSON at all.
//!
//! Each key is searched for independently with a tolerant pattern: the key
//! (quoted or bare), optional whitespace, a colon, then a quoted, bracketed,
//! or literal value.

use std::sync::LazyLock;

use quarry_core::constants::{FORMAT_ANOMALY, NOT_APPLICABLE};
use quarry_core::models::{FinalAnswer, StructuredAnswer};
use regex::Regex;
use serde_json::Value;

use super::object::coerce_pages;
use super::parse_failure_analysis;

const KEY_SEPARATOR: &str = r#"["']?\s*:\s*"#;

fn key_pattern(key: &str, value: &str) -> Option<Regex> {
    Regex::new(&format!(r#"(?s)["']?{key}{KEY_SEPARATOR}{value}"#)).ok()
}

/// A double-quoted JSON string body, escapes included.
const QUOTED: &str = r#""((?:[^"\\]|\\.)*)""#;

static ANALYSIS_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| key_pattern("step_by_step_analysis", QUOTED));
static SUMMARY_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| key_pattern("reasoning_summary", QUOTED));
static PAGES_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| key_pattern("relevant_pages", r"\[([^\]]*)\]"));
static ANSWER_QUOTED_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| key_pattern("final_answer", QUOTED));
static ANSWER_LIST_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| key_pattern("final_answer", r"(\[[^\]]*\])"));
static ANSWER_LITERAL_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    key_pattern(
        "final_answer",
        r"(true|false|-?\d+(?:\.\d+)?(?:[eE][+-]?\d+)?)",
    )
});
static DIGITS_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\d+").ok());
static BARE_PAGES_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\[(\s*\d+(?:\s*,\s*\d+)*\s*)\]").ok());

fn capture<'t>(re: &LazyLock<Option<Regex>>, text: &'t str) -> Option<&'t str> {
    let re = re.as_ref()?;
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Decode JSON string escapes; keep the raw capture if they are malformed.
fn unescape(body: &str) -> String {
    serde_json::from_str::<String>(&format!("\"{body}\"")).unwrap_or_else(|_| body.to_string())
}

fn recover_pages(text: &str) -> Option<Vec<u32>> {
    let span = capture(&PAGES_RE, text)?;
    if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(&format!("[{span}]")) {
        return Some(coerce_pages(&items));
    }
    let digits = DIGITS_RE.as_ref()?;
    Some(
        digits
            .find_iter(span)
            .filter_map(|m| m.as_str().parse().ok())
            .collect(),
    )
}

/// The first bare integer list in the text, used when `relevant_pages` is absent.
fn bare_page_list(text: &str) -> Option<Vec<u32>> {
    let span = capture(&BARE_PAGES_RE, text)?;
    let digits = DIGITS_RE.as_ref()?;
    Some(
        digits
            .find_iter(span)
            .filter_map(|m| m.as_str().parse().ok())
            .collect(),
    )
}

fn recover_final_answer(text: &str) -> Option<FinalAnswer> {
    if let Some(body) = capture(&ANSWER_QUOTED_RE, text) {
        let answer = unescape(body);
        return Some(if answer == NOT_APPLICABLE {
            FinalAnswer::NotAvailable
        } else {
            FinalAnswer::Text(answer)
        });
    }
    [&ANSWER_LIST_RE, &ANSWER_LITERAL_RE]
        .into_iter()
        .filter_map(|re| capture(re, text))
        .filter_map(|raw| serde_json::from_str::<Value>(raw).ok())
        .find_map(|value| FinalAnswer::try_from(value).ok())
}

/// Stage 5: assemble whatever subset of the four keys can be found.
///
/// Returns `None` when no key is found at all. A bare integer list only
/// fills in pages once some key has been found.
pub(crate) fn recover_fields(text: &str) -> Option<StructuredAnswer> {
    let analysis = capture(&ANALYSIS_RE, text).map(unescape);
    let summary = capture(&SUMMARY_RE, text).map(unescape);
    let pages = recover_pages(text);
    let final_answer = recover_final_answer(text);

    if analysis.is_none() && summary.is_none() && pages.is_none() && final_answer.is_none() {
        return None;
    }

    Some(StructuredAnswer {
        step_by_step_analysis: analysis.unwrap_or_else(|| parse_failure_analysis(text)),
        reasoning_summary: summary.unwrap_or_else(|| FORMAT_ANOMALY.to_string()),
        relevant_pages: pages
            .or_else(|| bare_page_list(text))
            .unwrap_or_default(),
        final_answer: final_answer.unwrap_or_else(|| FinalAnswer::Text(text.to_string())),
    })
}
