use quarry_answer::comparative::{comparative_answer, rephrase_question, CompanyAnswer};
use quarry_answer::{classify, parse, parse_with_stage};
use quarry_core::constants::{FORMAT_ANOMALY, PARSE_FAILURE_PREFIX};
use quarry_core::models::{AnswerType, FinalAnswer, ParseStage};
use test_fixtures::{load_golden_replies, FailingLanguageModel, ScriptedLanguageModel};

// ---------------------------------------------------------------------------
// Golden replies
// ---------------------------------------------------------------------------

#[test]
fn golden_replies_parse_at_expected_stage() {
    for case in load_golden_replies() {
        let parsed = parse_with_stage(&case.reply);
        assert_eq!(parsed.stage, case.expected_stage, "case: {}", case.name);
        assert_eq!(
            serde_json::to_value(&parsed.answer.final_answer).unwrap(),
            case.expected_final_answer,
            "case: {}",
            case.name
        );
        if let Some(pages) = case.expected_pages {
            assert_eq!(parsed.answer.relevant_pages, pages, "case: {}", case.name);
        }
    }
}

// ---------------------------------------------------------------------------
// Totality on hostile input
// ---------------------------------------------------------------------------

#[test]
fn hostile_inputs_all_produce_populated_answers() {
    let inputs = [
        "",
        "{",
        "}{",
        "```",
        "``````",
        "```json\n",
        "{\"final_answer\": {\"nested\": true}}",
        "{\"final_answer\": null}",
        "\"final_answer\": [\"unterminated",
        "relevant_pages: [99999999999999999999]",
        "🙂 {\"final_answer\": \"ok\",,}",
    ];
    for input in inputs {
        let answer = parse(input);
        assert!(!answer.step_by_step_analysis.is_empty(), "input: {input:?}");
        assert!(!answer.reasoning_summary.is_empty(), "input: {input:?}");
    }
}

#[test]
fn nested_object_answer_falls_through_to_last_resort() {
    let raw = "{\"final_answer\": {\"nested\": true}}";
    let parsed = parse_with_stage(raw);
    assert_eq!(parsed.stage, ParseStage::LastResort);
    assert_eq!(parsed.answer.final_answer, FinalAnswer::text(raw));
    assert_eq!(parsed.answer.reasoning_summary, FORMAT_ANOMALY);
    assert!(parsed
        .answer
        .step_by_step_analysis
        .starts_with(PARSE_FAILURE_PREFIX));
}

#[test]
fn oversized_page_numbers_are_dropped() {
    let parsed = parse_with_stage("relevant_pages: [99999999999999999999, 7]");
    assert_eq!(parsed.stage, ParseStage::FieldRecovery);
    assert_eq!(parsed.answer.relevant_pages, vec![7]);
}

#[test]
fn later_fence_is_tried_when_first_is_not_json() {
    let raw = "```text\nnot json\n```\nthen\n```json\n{\"final_answer\": true}\n```";
    let parsed = parse_with_stage(raw);
    assert_eq!(parsed.stage, ParseStage::Fenced);
    assert_eq!(parsed.answer.final_answer, FinalAnswer::Boolean(true));
}

// ---------------------------------------------------------------------------
// Classifier on realistic questions
// ---------------------------------------------------------------------------

#[test]
fn classifier_covers_every_answer_type() {
    let cases = [
        ("公司2022年总资产是多少", AnswerType::Number),
        ("公司的首席执行官是谁", AnswerType::Name),
        ("年报是否宣布了分红政策变更", AnswerType::Boolean),
        ("哪些高管新上任", AnswerType::Names),
        ("简述公司主营业务", AnswerType::String),
        ("What was the net profit in 2022?", AnswerType::Number),
        ("Who chairs the audit committee?", AnswerType::Name),
        ("Does the company plan a share buyback?", AnswerType::Boolean),
        ("List the new products launched this year", AnswerType::Names),
    ];
    for (question, expected) in cases {
        assert_eq!(classify(question), expected, "question: {question}");
    }
}

// ---------------------------------------------------------------------------
// Comparative questions
// ---------------------------------------------------------------------------

#[test]
fn rephrase_splits_per_company() {
    let llm = ScriptedLanguageModel::always(
        r#"```json
{"questions": [
  {"company_name": "Acme", "question": "What was Acme's revenue in 2022?"},
  {"company_name": "Beta", "question": "What was Beta's revenue in 2022?"},
  {"company_name": "", "question": "dropped"}
]}
```"#,
    );
    let questions =
        rephrase_question(&llm, "Who had more revenue, Acme or Beta?", &["Acme", "Beta"]).unwrap();
    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0].company_name, "Acme");
    assert!(llm.prompts()[0].contains("Companies: \"Acme\", \"Beta\""));
}

#[test]
fn rephrase_with_unreadable_reply_is_empty() {
    let llm = ScriptedLanguageModel::always("I cannot do that.");
    let questions = rephrase_question(&llm, "Compare A and B", &["A", "B"]).unwrap();
    assert!(questions.is_empty());
}

#[test]
fn rephrase_propagates_model_failure() {
    assert!(rephrase_question(&FailingLanguageModel, "Compare A and B", &["A", "B"]).is_err());
}

#[test]
fn comparative_answer_returns_company() {
    let llm = ScriptedLanguageModel::always(
        r#"{"step_by_step_analysis": "1. Acme 6.6bn, Beta 1.2bn.", "reasoning_summary": "Acme larger.", "relevant_pages": [], "final_answer": "Acme"}"#,
    );
    let answers = [
        CompanyAnswer {
            company_name: "Acme".into(),
            answer: FinalAnswer::Number(6_601_086_000u64.into()),
        },
        CompanyAnswer {
            company_name: "Beta".into(),
            answer: FinalAnswer::Number(1_249_642_000u64.into()),
        },
    ];
    let answer = comparative_answer(&llm, &answers, "Which had more total assets?");
    assert_eq!(answer, FinalAnswer::text("Acme"));
    assert!(llm.prompts()[0].contains("Acme: 6601086000"));
}

#[test]
fn comparative_answer_degrades_to_not_available() {
    let answers = [CompanyAnswer {
        company_name: "Acme".into(),
        answer: FinalAnswer::NotAvailable,
    }];
    assert_eq!(
        comparative_answer(&FailingLanguageModel, &answers, "Which?"),
        FinalAnswer::NotAvailable
    );
    let prose = ScriptedLanguageModel::always("Hard to say.");
    assert_eq!(
        comparative_answer(&prose, &answers, "Which?"),
        FinalAnswer::NotAvailable
    );
}
