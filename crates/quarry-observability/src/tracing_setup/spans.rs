//! Span definitions per pipeline stage: ask, retrieval, rerank, answer parsing, model call.

/// Create the top-level span for one `ask` request.
#[macro_export]
macro_rules! ask_span {
    ($request_id:expr, $answer_type:expr) => {
        tracing::info_span!("quarry.ask", request_id = %$request_id, answer_type = %$answer_type)
    };
}

/// Create a hybrid retrieval span.
#[macro_export]
macro_rules! retrieval_span {
    ($query:expr, $top_k:expr) => {
        tracing::info_span!("quarry.retrieval", query = %$query, top_k = $top_k)
    };
}

/// Create a rerank span.
#[macro_export]
macro_rules! rerank_span {
    ($strategy:expr, $candidates:expr) => {
        tracing::info_span!("quarry.rerank", strategy = %$strategy, candidates = $candidates)
    };
}

/// Create a language-model invocation span.
#[macro_export]
macro_rules! llm_span {
    ($model:expr, $prompt_chars:expr) => {
        tracing::info_span!("quarry.llm", model = %$model, prompt_chars = $prompt_chars)
    };
}

/// Create a response-parsing span.
#[macro_export]
macro_rules! parse_span {
    ($reply_chars:expr) => {
        tracing::debug_span!("quarry.parse", reply_chars = $reply_chars)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const ASK: &str = "quarry.ask";
    pub const RETRIEVAL: &str = "quarry.retrieval";
    pub const RERANK: &str = "quarry.rerank";
    pub const LLM: &str = "quarry.llm";
    pub const PARSE: &str = "quarry.parse";
}
