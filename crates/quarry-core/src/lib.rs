//! # quarry-core
//!
//! Foundation crate for the Quarry question-answering pipeline.
//! Defines the shared models, collaborator traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::QuarryConfig;
pub use errors::{QuarryError, QuarryResult};
pub use models::{
    AnswerType, AskResponse, Candidate, Document, FinalAnswer, ParseStage, RerankOutcome,
    RerankStatus, Reranking, SearchHit, Source, StructuredAnswer,
};
