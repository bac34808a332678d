//! Comparative questions across several companies.
//!
//! A question such as "which had higher revenue, A or B?" is split into one
//! question per company, each answered through the normal pipeline, and the
//! individual answers are merged by a final model call.

use quarry_core::errors::QuarryResult;
use quarry_core::models::{FinalAnswer, ParseStage};
use quarry_core::traits::LanguageModel;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::parser::{extract_json_with, parse_with_stage};
use crate::prompts;

/// One per-company question produced by `rephrase_question`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RephrasedQuestion {
    pub company_name: String,
    pub question: String,
}

/// One company's individual answer, fed into `comparative_answer`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyAnswer {
    pub company_name: String,
    pub answer: FinalAnswer,
}

#[derive(Deserialize)]
struct RephrasedQuestions {
    questions: Vec<RephrasedQuestion>,
}

fn accept_questions(value: Value) -> Option<Vec<RephrasedQuestion>> {
    serde_json::from_value::<RephrasedQuestions>(value)
        .ok()
        .map(|parsed| parsed.questions)
}

/// Split a comparative question into one question per company.
///
/// Model failures propagate. An unreadable reply yields an empty list.
pub fn rephrase_question(
    llm: &dyn LanguageModel,
    question: &str,
    companies: &[&str],
) -> QuarryResult<Vec<RephrasedQuestion>> {
    let reply = llm.invoke(&prompts::rephrase_prompt(question, companies))?;

    let Some((questions, stage)) = extract_json_with(&reply, accept_questions) else {
        tracing::warn!(
            reply_chars = reply.len(),
            "rephrase reply held no question list"
        );
        return Ok(Vec::new());
    };
    tracing::debug!(stage = %stage, count = questions.len(), "rephrased comparative question");

    Ok(questions
        .into_iter()
        .filter(|q| !q.company_name.trim().is_empty() && !q.question.trim().is_empty())
        .collect())
}

fn format_answers(answers: &[CompanyAnswer]) -> String {
    answers
        .iter()
        .map(|a| format!("{}: {}", a.company_name, a.answer))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Merge per-company answers into the answer to the original question.
///
/// Any failure, including a reply with no recognisable answer, yields `NotAvailable`.
pub fn comparative_answer(
    llm: &dyn LanguageModel,
    answers: &[CompanyAnswer],
    question: &str,
) -> FinalAnswer {
    let prompt = prompts::comparative_prompt(&format_answers(answers), question);
    let reply = match llm.invoke(&prompt) {
        Ok(reply) => reply,
        Err(e) => {
            tracing::warn!(error = %e, "comparative answer failed");
            return FinalAnswer::NotAvailable;
        }
    };

    let parsed = parse_with_stage(&reply);
    match parsed.stage {
        ParseStage::LastResort => FinalAnswer::NotAvailable,
        _ if parsed.answer.final_answer.is_blank() => FinalAnswer::NotAvailable,
        _ => parsed.answer.final_answer,
    }
}
