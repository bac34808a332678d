//! # quarry-answer
//!
//! Everything between retrieved context and a validated answer:
//!
//! ```text
//! question ──► classifier ──► AnswerType ──► prompts ──► prompt text
//!                                                          │
//!                                               LanguageModel::invoke
//!                                                          │
//! StructuredAnswer ◄── parser (six-stage cascade) ◄── raw reply
//! ```
//!
//! `comparative` builds on the same pieces to split a multi-company question
//! and merge the per-company answers.

pub mod classifier;
pub mod comparative;
pub mod parser;
pub mod prompts;

pub use classifier::classify;
pub use parser::{parse, parse_with_stage, ParsedAnswer};
