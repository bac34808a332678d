// Single source of truth for all default values.

// --- Retrieval ---
pub const DEFAULT_VECTOR_WEIGHT: f64 = 0.7;
pub const DEFAULT_TOP_K: usize = 5;
pub const DEFAULT_FUSION_MULTIPLIER: usize = 2;
pub const DEFAULT_USE_RERANK: bool = true;

// --- Rerank ---
pub const DEFAULT_RERANK_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_RERANK_REQUEST_TIMEOUT_MS: u64 = 8_000;
pub const DEFAULT_RERANK_ENDPOINT: &str = "https://api.jina.ai/v1/rerank";
pub const DEFAULT_RERANK_MODEL: &str = "jina-reranker-v2-base-multilingual";
pub const DEFAULT_RERANK_API_KEY_ENV: &str = "JINA_API_KEY";
pub const DEFAULT_LOCAL_RERANK_MODEL: &str = "BAAI/bge-reranker-base";

// --- Language model ---
pub const DEFAULT_LLM_ENDPOINT: &str =
    "https://dashscope.aliyuncs.com/compatible-mode/v1/chat/completions";
pub const DEFAULT_LLM_MODEL: &str = "qwen-max";
pub const DEFAULT_LLM_API_KEY_ENV: &str = "DASHSCOPE_API_KEY";
pub const DEFAULT_LLM_TEMPERATURE: f32 = 0.3;
pub const DEFAULT_LLM_MAX_TOKENS: u32 = 2_000;
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 60;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LOG_JSON: bool = true;
