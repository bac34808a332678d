//! fastembed `TextRerank` as a `PairScorer`.

use std::sync::Mutex;

use fastembed::{RerankInitOptions, RerankerModel, TextRerank};
use quarry_core::errors::RerankError;

use super::PairScorer;

pub(crate) struct CrossEncoder {
    model: Mutex<TextRerank>,
}

fn resolve_model(name: &str) -> Result<RerankerModel, RerankError> {
    match name {
        "BAAI/bge-reranker-base" => Ok(RerankerModel::BGERerankerBase),
        "rozgo/bge-reranker-v2-m3" => Ok(RerankerModel::BGERerankerV2M3),
        "jinaai/jina-reranker-v1-turbo-en" => Ok(RerankerModel::JINARerankerV1TurboEn),
        "jinaai/jina-reranker-v2-base-multilingual" => {
            Ok(RerankerModel::JINARerankerV2BaseMultiligual)
        }
        other => Err(RerankError::ModelLoadFailed {
            model: other.to_string(),
            reason: "unsupported cross-encoder".to_string(),
        }),
    }
}

impl CrossEncoder {
    pub(crate) fn load(model_name: &str) -> Result<Self, RerankError> {
        let model = TextRerank::try_new(RerankInitOptions::new(resolve_model(model_name)?))
            .map_err(|e| RerankError::ModelLoadFailed {
                model: model_name.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            model: Mutex::new(model),
        })
    }
}

impl PairScorer for CrossEncoder {
    fn score_pairs(&self, query: &str, documents: &[&str]) -> Result<Vec<f64>, RerankError> {
        let mut model = self.model.lock().map_err(|_| RerankError::InferenceFailed {
            reason: "cross-encoder lock poisoned".to_string(),
        })?;
        let results = model
            .rerank(query, documents.to_vec(), false, None)
            .map_err(|e| RerankError::InferenceFailed {
                reason: e.to_string(),
            })?;

        // fastembed returns results sorted by score; put them back in input order.
        let mut scores = vec![f64::NAN; documents.len()];
        for result in results {
            if let Some(slot) = scores.get_mut(result.index) {
                *slot = f64::from(result.score);
            }
        }
        Ok(scores)
    }
}
