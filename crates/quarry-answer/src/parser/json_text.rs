//! Locating and repairing JSON embedded in free-form model text.
//!
//! These helpers back the first four parse stages and are shared with any
//! caller that needs "the JSON somewhere in this reply" (the LLM-judge
//! reranker, comparative question splitting).

use quarry_core::models::ParseStage;
use serde_json::Value;

const FENCE: &str = "```";

/// Segments wrapped in ``` fences, each with a leading language tag removed.
///
/// Every span between two adjacent markers is returned, so nested or repeated
/// fences all get a chance; an unterminated fence contributes its tail.
pub fn fenced_segments(text: &str) -> Vec<&str> {
    let markers: Vec<usize> = text.match_indices(FENCE).map(|(i, _)| i).collect();
    if markers.is_empty() {
        return Vec::new();
    }

    let mut segments: Vec<&str> = markers
        .windows(2)
        .map(|pair| &text[pair[0] + FENCE.len()..pair[1]])
        .collect();
    if markers.len() % 2 == 1 {
        if let Some(&last) = markers.last() {
            segments.push(&text[last + FENCE.len()..]);
        }
    }

    segments
        .into_iter()
        .map(strip_language_tag)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Drop a `json`-style tag sitting on the fence's opening line.
fn strip_language_tag(segment: &str) -> &str {
    let Some((first_line, rest)) = segment.split_once('\n') else {
        return segment.trim();
    };
    let tag = first_line.trim();
    if tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
        rest.trim()
    } else {
        segment.trim()
    }
}

/// The substring from the first `{` to the last `}`, if both exist in order.
pub fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Repair the two most common model JSON defects: trailing commas before a
/// closing bracket, and raw control characters inside string literals.
pub fn clean_json(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    let mut chars = text.char_indices().peekable();
    let mut in_string = false;
    let mut escaped = false;

    while let Some((i, c)) = chars.next() {
        if in_string {
            match c {
                _ if escaped => {
                    escaped = false;
                    out.push(c);
                }
                '\\' => {
                    escaped = true;
                    out.push(c);
                }
                '"' => {
                    in_string = false;
                    out.push(c);
                }
                '\n' => out.push_str("\\n"),
                '\t' => out.push_str("\\t"),
                '\r' => out.push_str("\\r"),
                c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
                c => out.push(c),
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            ',' => {
                let next = text[i + 1..].trim_start().chars().next();
                if !matches!(next, Some('}') | Some(']')) {
                    out.push(c);
                }
            }
            c => out.push(c),
        }
    }
    out
}

/// Parse `text` as JSON, logging the failure at debug level.
pub fn parse_value(text: &str) -> Option<Value> {
    match serde_json::from_str(text) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!(error = %e, chars = text.len(), "json parse failed");
            None
        }
    }
}

/// Run the four JSON stages over `text`, returning the first value `accept` takes.
pub fn extract_json_with<T>(
    text: &str,
    accept: impl Fn(Value) -> Option<T>,
) -> Option<(T, ParseStage)> {
    let accept_str = |s: &str| parse_value(s).and_then(&accept);

    if let Some(found) = accept_str(text.trim()) {
        return Some((found, ParseStage::Direct));
    }
    if let Some(found) = fenced_segments(text).into_iter().find_map(accept_str) {
        return Some((found, ParseStage::Fenced));
    }
    let span = brace_span(text)?;
    if let Some(found) = accept_str(span) {
        return Some((found, ParseStage::BraceSpan));
    }
    accept_str(&clean_json(span)).map(|found| (found, ParseStage::CleanedBraceSpan))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fenced_segment_drops_language_tag() {
        let text = "Here you go:\n```json\n{\"a\": 1}\n```\nThanks";
        assert_eq!(fenced_segments(text)[0], "{\"a\": 1}");
    }

    #[test]
    fn unterminated_fence_yields_tail() {
        let text = "```json\n{\"a\": 1}";
        assert_eq!(fenced_segments(text), vec!["{\"a\": 1}"]);
    }

    #[test]
    fn no_fence_no_segments() {
        assert!(fenced_segments("{\"a\": 1}").is_empty());
    }

    #[test]
    fn one_line_fence_keeps_content() {
        assert_eq!(fenced_segments("```{\"a\":1}```"), vec!["{\"a\":1}"]);
    }

    #[test]
    fn brace_span_requires_order() {
        assert_eq!(brace_span("x {a} y {b} z"), Some("{a} y {b}"));
        assert_eq!(brace_span("} backwards {"), None);
        assert_eq!(brace_span("no braces"), None);
    }

    #[test]
    fn clean_json_removes_trailing_commas() {
        let cleaned = clean_json("{\"a\": [1, 2,], \"b\": 3,\n}");
        assert_eq!(parse_value(&cleaned), Some(serde_json::json!({"a": [1, 2], "b": 3})));
    }

    #[test]
    fn clean_json_escapes_control_chars_only_inside_strings() {
        let cleaned = clean_json("{\n\"a\": \"line one\nline\ttwo\"\n}");
        assert_eq!(
            parse_value(&cleaned),
            Some(serde_json::json!({"a": "line one\nline\ttwo"}))
        );
    }

    #[test]
    fn clean_json_keeps_commas_inside_strings() {
        let cleaned = clean_json("{\"a\": \"x,}\",}");
        assert_eq!(parse_value(&cleaned), Some(serde_json::json!({"a": "x,}"})));
    }

    #[test]
    fn clean_json_respects_escaped_quotes() {
        let cleaned = clean_json("{\"a\": \"say \\\"hi\\\",\n\",}");
        assert_eq!(
            parse_value(&cleaned),
            Some(serde_json::json!({"a": "say \"hi\",\n"}))
        );
    }

    #[test]
    fn extract_reports_the_stage_that_succeeded() {
        let accept = |v: Value| v.get("k").cloned();
        assert_eq!(
            extract_json_with("{\"k\": 1}", accept).map(|(_, s)| s),
            Some(ParseStage::Direct)
        );
        assert_eq!(
            extract_json_with("```\n{\"k\": 1}\n```", accept).map(|(_, s)| s),
            Some(ParseStage::Fenced)
        );
        assert_eq!(
            extract_json_with("sure! {\"k\": 1} done", accept).map(|(_, s)| s),
            Some(ParseStage::BraceSpan)
        );
        assert_eq!(
            extract_json_with("sure! {\"k\": 1,} done", accept).map(|(_, s)| s),
            Some(ParseStage::CleanedBraceSpan)
        );
        assert!(extract_json_with("nothing here", accept).is_none());
    }
}
