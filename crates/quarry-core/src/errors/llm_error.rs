/// Language-model invocation errors.
#[derive(Debug, thiserror::Error)]
pub enum LanguageModelError {
    #[error("request failed: {reason}")]
    RequestFailed { reason: String },

    #[error("model endpoint returned {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("model returned an empty response")]
    EmptyResponse,

    #[error("malformed model response: {reason}")]
    MalformedResponse { reason: String },

    #[error("missing API key: set {env_var}")]
    MissingApiKey { env_var: String },
}
