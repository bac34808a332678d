use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    AnswerType, Candidate, DegradationEvent, FinalAnswer, Metadata, ParseStage, RerankStatus,
    StructuredAnswer,
};
use crate::constants::{excerpt, SOURCE_PREVIEW_CHARS};

/// Provenance for one candidate that fed the model context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub id: String,
    /// First characters of the candidate content.
    pub preview: String,
    pub metadata: Metadata,
    /// Rerank score when reranking ran, else the fused score.
    pub score: f64,
    pub fused_score: f64,
    pub original_rank: usize,
    pub rerank_rank: Option<usize>,
    pub reranked: bool,
}

impl From<&Candidate> for Source {
    fn from(candidate: &Candidate) -> Self {
        Self {
            id: candidate.id.clone(),
            preview: excerpt(&candidate.content, SOURCE_PREVIEW_CHARS),
            metadata: candidate.metadata.clone(),
            score: candidate.effective_score(),
            fused_score: candidate.fused_score,
            original_rank: candidate.original_rank,
            rerank_rank: candidate.rerank_rank,
            reranked: candidate.rerank_score.is_some(),
        }
    }
}

/// Everything `ask` returns for one question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    pub request_id: Uuid,
    pub answer: FinalAnswer,
    pub answer_type: AnswerType,
    pub structured: StructuredAnswer,
    pub parse_stage: ParseStage,
    pub sources: Vec<Source>,
    pub candidates: Vec<Candidate>,
    pub rerank_status: RerankStatus,
    /// Optional stages that fell back while serving this request.
    pub degradations: Vec<DegradationEvent>,
}
