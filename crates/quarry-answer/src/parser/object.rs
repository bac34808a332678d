//! Acceptance rules for a parsed JSON object.
//!
//! `final_answer` is mandatory. The other keys may be absent (canonical
//! defaults are substituted) but must have an acceptable type when present.

use quarry_core::constants::{MISSING_ANALYSIS, MISSING_SUMMARY};
use quarry_core::models::{FinalAnswer, StructuredAnswer};
use serde_json::{Map, Value};

/// Build a `StructuredAnswer` from a JSON value, or reject it.
pub(crate) fn structured_from_value(value: Value) -> Option<StructuredAnswer> {
    let Value::Object(mut map) = value else {
        return None;
    };

    let final_answer = match FinalAnswer::try_from(map.remove("final_answer")?) {
        Ok(answer) => answer,
        Err(reason) => {
            tracing::debug!(%reason, "final_answer rejected");
            return None;
        }
    };

    Some(StructuredAnswer {
        step_by_step_analysis: text_field(&mut map, "step_by_step_analysis", MISSING_ANALYSIS)?,
        reasoning_summary: text_field(&mut map, "reasoning_summary", MISSING_SUMMARY)?,
        relevant_pages: match map.remove("relevant_pages") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => coerce_pages(&items),
            Some(other) => {
                tracing::debug!(value = %other, "relevant_pages is not a list");
                return None;
            }
        },
        final_answer,
    })
}

/// A text field: a string, or a list of scalars joined one per line.
fn text_field(map: &mut Map<String, Value>, key: &str, default: &str) -> Option<String> {
    match map.remove(key) {
        None | Some(Value::Null) => Some(default.to_string()),
        Some(Value::String(s)) => Some(s),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
            .map(|lines| lines.join("\n")),
        Some(other) => {
            tracing::debug!(key, value = %other, "text field has unexpected type");
            None
        }
    }
}

/// Keep every element that reads as a page number; drop the rest.
pub(crate) fn coerce_pages(items: &[Value]) -> Vec<u32> {
    items.iter().filter_map(coerce_page).collect()
}

fn coerce_page(item: &Value) -> Option<u32> {
    match item {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= 0.0)
                    .map(|f| f as u64)
            })
            .and_then(|page| u32::try_from(page).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn full_object_is_accepted() {
        let answer = structured_from_value(json!({
            "step_by_step_analysis": "a",
            "reasoning_summary": "b",
            "relevant_pages": [1, 2],
            "final_answer": "c"
        }))
        .unwrap();
        assert_eq!(answer.relevant_pages, vec![1, 2]);
        assert_eq!(answer.final_answer, FinalAnswer::text("c"));
    }

    #[test]
    fn missing_final_answer_is_rejected() {
        assert!(structured_from_value(json!({"step_by_step_analysis": "a"})).is_none());
        assert!(structured_from_value(json!({"final_answer": null})).is_none());
    }

    #[test]
    fn absent_optional_keys_get_defaults() {
        let answer = structured_from_value(json!({"final_answer": "42"})).unwrap();
        assert_eq!(answer.step_by_step_analysis, MISSING_ANALYSIS);
        assert_eq!(answer.reasoning_summary, MISSING_SUMMARY);
        assert!(answer.relevant_pages.is_empty());
    }

    #[test]
    fn wrong_typed_optional_key_is_rejected() {
        assert!(structured_from_value(json!({"final_answer": 1, "relevant_pages": "3"})).is_none());
        assert!(structured_from_value(json!({"final_answer": 1, "reasoning_summary": {}})).is_none());
    }

    #[test]
    fn pages_are_coerced_leniently() {
        let pages = coerce_pages(&[
            json!(3),
            json!(4.0),
            json!(" 5 "),
            json!(2.5),
            json!(-1),
            json!("page six"),
            json!(null),
        ]);
        assert_eq!(pages, vec![3, 4, 5]);
    }

    #[test]
    fn analysis_list_is_joined() {
        let answer = structured_from_value(json!({
            "step_by_step_analysis": ["1. read", "2. answer"],
            "final_answer": true
        }))
        .unwrap();
        assert_eq!(answer.step_by_step_analysis, "1. read\n2. answer");
    }

    #[test]
    fn non_object_is_rejected() {
        assert!(structured_from_value(json!([1, 2])).is_none());
        assert!(structured_from_value(json!("text")).is_none());
    }
}
