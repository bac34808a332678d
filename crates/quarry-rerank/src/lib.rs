//! # quarry-rerank
//!
//! Second-pass reranking over a fused candidate list.
//!
//! Every backend implements [`RerankerStrategy`] and shares one fallback:
//! when scoring fails the incoming order is kept and the result is marked
//! `Degraded`. Reranking never fails a request.
//!
//! | backend      | scorer                                   |
//! |--------------|------------------------------------------|
//! | passthrough  | `1 / (rank + 1)` over the fused order    |
//! | local_model  | cross-encoder loaded once per process     |
//! | remote_api   | Jina-compatible HTTP endpoint             |
//! | llm_judge    | language model scoring each block         |

pub mod factory;
pub mod llm_judge;
pub mod local;
pub mod outcome;
pub mod passthrough;
pub mod remote;
pub mod strategy;

pub use factory::create_reranker;
pub use llm_judge::LlmJudgeReranker;
pub use local::{LocalModelReranker, ModelLoader, ModelState, PairScorer};
pub use passthrough::PassThroughReranker;
pub use remote::RemoteApiReranker;
pub use strategy::RerankerStrategy;
