//! Language-model service clients.

mod http_llm;

pub use http_llm::HttpLanguageModel;
