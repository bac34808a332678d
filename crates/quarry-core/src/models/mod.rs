mod answer_type;
mod ask_response;
mod candidate;
mod degradation_event;
mod document;
mod rerank_outcome;
mod structured_answer;

pub use answer_type::AnswerType;
pub use ask_response::{AskResponse, Source};
pub use candidate::{Candidate, Metadata, SearchHit};
pub use degradation_event::DegradationEvent;
pub use document::Document;
pub use rerank_outcome::{RerankOutcome, RerankStatus, Reranking};
pub use structured_answer::{FinalAnswer, ParseStage, StructuredAnswer};
