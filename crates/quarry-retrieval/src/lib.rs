//! # quarry-retrieval
//!
//! Hybrid retrieval and the `ask` pipeline.
//!
//! ## Architecture
//!
//! ```text
//! RetrievalPipeline
//! ├── Embedder + DenseSearch ─┐  (rayon::join)
//! ├── SparseSearch ───────────┤
//! ├── fusion::fuse (weighted sum, dedup by id)
//! ├── RerankerStrategy (bounded by a timeout)
//! ├── context (blank-line joined contents, sources)
//! └── LanguageModel ──► quarry_answer::parse
//! ```

pub mod context;
pub mod engine;
pub mod fusion;
pub mod providers;

pub use engine::{Retrieval, RetrievalPipeline};
pub use fusion::fuse;
pub use providers::HttpLanguageModel;
