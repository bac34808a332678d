use proptest::prelude::*;
use quarry_answer::parser::json_text::clean_json;
use quarry_answer::{parse, parse_with_stage};
use quarry_core::models::{FinalAnswer, ParseStage, StructuredAnswer};

fn final_answer_strategy() -> impl Strategy<Value = FinalAnswer> {
    prop_oneof![
        "[a-zA-Z0-9 ,.]{0,40}".prop_map(FinalAnswer::Text),
        any::<i64>().prop_map(|n| FinalAnswer::Number(n.into())),
        (-4000i32..4000).prop_map(|q| {
            FinalAnswer::Number(
                serde_json::Number::from_f64(f64::from(q) / 4.0).expect("finite"),
            )
        }),
        any::<bool>().prop_map(FinalAnswer::Boolean),
        prop::collection::vec("[a-zA-Z ]{1,20}", 0..5).prop_map(FinalAnswer::Names),
        Just(FinalAnswer::NotAvailable),
    ]
}

fn structured_answer_strategy() -> impl Strategy<Value = StructuredAnswer> {
    (
        "[ -~]{0,80}",
        "[ -~]{0,40}",
        prop::collection::vec(any::<u32>(), 0..6),
        final_answer_strategy(),
    )
        .prop_map(|(analysis, summary, pages, final_answer)| StructuredAnswer {
            step_by_step_analysis: analysis,
            reasoning_summary: summary,
            relevant_pages: pages,
            final_answer,
        })
}

proptest! {
    #[test]
    fn parse_is_total(s in "\\PC{0,300}") {
        let answer = parse(&s);
        prop_assert!(!answer.reasoning_summary.is_empty());
        prop_assert!(!answer.step_by_step_analysis.is_empty());
    }

    #[test]
    fn parse_is_total_on_json_like_noise(s in "[{}\\[\\]\",:a-z0-9 \n`]{0,120}") {
        let _ = parse_with_stage(&s);
    }

    #[test]
    fn canonical_form_round_trips(answer in structured_answer_strategy()) {
        let text = answer.to_json().unwrap();
        let parsed = parse_with_stage(&text);
        prop_assert_eq!(parsed.stage, ParseStage::Direct);
        prop_assert_eq!(parsed.answer, answer);
    }

    #[test]
    fn fenced_canonical_form_round_trips(answer in structured_answer_strategy()) {
        let text = format!("Answer:\n```json\n{}\n```", answer.to_json().unwrap());
        prop_assert_eq!(parse(&text), answer);
    }

    #[test]
    fn cleaning_valid_json_preserves_meaning(answer in structured_answer_strategy()) {
        let text = answer.to_json().unwrap();
        let original: serde_json::Value = serde_json::from_str(&text).unwrap();
        let cleaned: serde_json::Value = serde_json::from_str(&clean_json(&text)).unwrap();
        prop_assert_eq!(original, cleaned);
    }
}
