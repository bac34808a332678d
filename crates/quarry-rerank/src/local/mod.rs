//! In-process cross-encoder reranking.
//!
//! The model is loaded lazily on first use, at most once per reranker even
//! under concurrent cold start. A failed load is final: the reranker stays
//! degraded for the life of the process and never retries.
//!
//! ```text
//! Uninitialized ──► Initializing ──┬──► Ready
//!                                  └──► PermanentlyDegraded
//! ```

#[cfg(feature = "local-reranker")]
mod cross_encoder;

use std::collections::HashMap;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Instant;

use quarry_core::config::RerankConfig;
use quarry_core::errors::RerankError;
use quarry_observability::tracing_setup::events;
use serde::{Deserialize, Serialize};

use crate::strategy::{RerankerStrategy, POSITIONAL_FALLBACK};

/// Scores (query, document) pairs. One score per document, in order.
pub trait PairScorer: Send + Sync {
    fn score_pairs(&self, query: &str, documents: &[&str]) -> Result<Vec<f64>, RerankError>;
}

/// Builds the scorer on first use.
pub type ModelLoader = Box<dyn Fn() -> Result<Box<dyn PairScorer>, RerankError> + Send + Sync>;

/// Lifecycle of the lazily loaded model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelState {
    Uninitialized,
    Initializing,
    Ready,
    PermanentlyDegraded,
}

impl ModelState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Uninitialized,
            1 => Self::Initializing,
            2 => Self::Ready,
            _ => Self::PermanentlyDegraded,
        }
    }

    fn as_u8(self) -> u8 {
        match self {
            Self::Uninitialized => 0,
            Self::Initializing => 1,
            Self::Ready => 2,
            Self::PermanentlyDegraded => 3,
        }
    }

    /// `Ready` and `PermanentlyDegraded` never change again.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Ready | Self::PermanentlyDegraded)
    }
}

/// Reranker backed by a locally loaded pairwise relevance model.
pub struct LocalModelReranker {
    model_name: String,
    loader: ModelLoader,
    model: OnceLock<Option<Box<dyn PairScorer>>>,
    state: AtomicU8,
}

impl std::fmt::Debug for LocalModelReranker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalModelReranker")
            .field("model_name", &self.model_name)
            .field("state", &self.state())
            .finish()
    }
}

impl LocalModelReranker {
    /// A reranker that loads its model with `loader` on first use.
    pub fn with_loader(model_name: impl Into<String>, loader: ModelLoader) -> Self {
        Self {
            model_name: model_name.into(),
            loader,
            model: OnceLock::new(),
            state: AtomicU8::new(ModelState::Uninitialized.as_u8()),
        }
    }

    /// A reranker for the configured cross-encoder.
    ///
    /// Without the `local-reranker` feature the load always fails, so the
    /// reranker degrades on first use.
    pub fn from_config(config: &RerankConfig) -> Self {
        let model_name = config.local_model.clone();
        let name_for_loader = model_name.clone();
        Self::with_loader(model_name, Box::new(move || load_cross_encoder(&name_for_loader)))
    }

    /// The process-wide reranker for `config.local_model`.
    ///
    /// Repeated calls with the same model name share one instance, so the
    /// model is loaded once per process.
    pub fn shared(config: &RerankConfig) -> Arc<Self> {
        static REGISTRY: OnceLock<Mutex<HashMap<String, Arc<LocalModelReranker>>>> =
            OnceLock::new();

        let registry = REGISTRY.get_or_init(|| Mutex::new(HashMap::new()));
        let mut registry = registry.lock().unwrap_or_else(|e| e.into_inner());
        registry
            .entry(config.local_model.clone())
            .or_insert_with(|| Arc::new(Self::from_config(config)))
            .clone()
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn state(&self) -> ModelState {
        ModelState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Load the model now instead of on the first rerank.
    pub fn warm_up(&self) -> ModelState {
        self.scorer();
        self.state()
    }

    fn scorer(&self) -> Option<&dyn PairScorer> {
        self.model.get_or_init(|| self.load()).as_deref()
    }

    fn load(&self) -> Option<Box<dyn PairScorer>> {
        self.state
            .store(ModelState::Initializing.as_u8(), Ordering::Release);
        let started = Instant::now();

        match (self.loader)() {
            Ok(scorer) => {
                events::model_loaded(&self.model_name, started.elapsed().as_millis() as u64);
                self.state.store(ModelState::Ready.as_u8(), Ordering::Release);
                Some(scorer)
            }
            Err(e) => {
                events::degradation_triggered(
                    "local_model",
                    &e.to_string(),
                    POSITIONAL_FALLBACK,
                );
                self.state
                    .store(ModelState::PermanentlyDegraded.as_u8(), Ordering::Release);
                None
            }
        }
    }
}

impl RerankerStrategy for LocalModelReranker {
    fn name(&self) -> &str {
        "local_model"
    }

    fn score(&self, query: &str, documents: &[&str]) -> Result<Vec<f64>, RerankError> {
        let scorer = self.scorer().ok_or_else(|| RerankError::Unavailable {
            reason: format!("model {} failed to load", self.model_name),
        })?;
        scorer.score_pairs(query, documents)
    }
}

#[cfg(feature = "local-reranker")]
fn load_cross_encoder(model_name: &str) -> Result<Box<dyn PairScorer>, RerankError> {
    cross_encoder::CrossEncoder::load(model_name)
        .map(|encoder| Box::new(encoder) as Box<dyn PairScorer>)
}

#[cfg(not(feature = "local-reranker"))]
fn load_cross_encoder(model_name: &str) -> Result<Box<dyn PairScorer>, RerankError> {
    Err(RerankError::ModelLoadFailed {
        model: model_name.to_string(),
        reason: "built without the local-reranker feature".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct LengthScorer;

    impl PairScorer for LengthScorer {
        fn score_pairs(&self, _query: &str, documents: &[&str]) -> Result<Vec<f64>, RerankError> {
            Ok(documents.iter().map(|d| d.len() as f64).collect())
        }
    }

    #[test]
    fn state_codes_round_trip() {
        for state in [
            ModelState::Uninitialized,
            ModelState::Initializing,
            ModelState::Ready,
            ModelState::PermanentlyDegraded,
        ] {
            assert_eq!(ModelState::from_u8(state.as_u8()), state);
        }
    }

    #[test]
    fn warm_up_reaches_ready() {
        let loader: ModelLoader =
            Box::new(|| -> Result<Box<dyn PairScorer>, RerankError> { Ok(Box::new(LengthScorer)) });
        let reranker = LocalModelReranker::with_loader("len", loader);
        assert_eq!(reranker.state(), ModelState::Uninitialized);
        assert_eq!(reranker.warm_up(), ModelState::Ready);
        assert_eq!(reranker.score("q", &["ab", "a"]).unwrap(), vec![2.0, 1.0]);
    }

    #[cfg(not(feature = "local-reranker"))]
    #[test]
    fn without_feature_the_model_never_loads() {
        let reranker = LocalModelReranker::from_config(&RerankConfig::default());
        assert_eq!(reranker.warm_up(), ModelState::PermanentlyDegraded);
        assert!(matches!(
            reranker.score("q", &["a"]),
            Err(RerankError::Unavailable { .. })
        ));
    }
}
