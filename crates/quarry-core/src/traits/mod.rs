mod language_model;
mod search;

pub use language_model::LanguageModel;
pub use search::{DenseSearch, Embedder, SparseSearch};
