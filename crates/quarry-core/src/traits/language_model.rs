use crate::errors::QuarryResult;

/// A synchronous language-model service: one prompt in, one text reply out.
pub trait LanguageModel: Send + Sync {
    fn invoke(&self, prompt: &str) -> QuarryResult<String>;

    /// Human-readable model name.
    fn name(&self) -> &str;
}
