//! Scripted language models.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use quarry_core::errors::{LanguageModelError, QuarryResult};
use quarry_core::traits::LanguageModel;

/// Replies from a script, in order. Once the script runs out the last reply repeats.
pub struct ScriptedLanguageModel {
    replies: Mutex<VecDeque<String>>,
    last: Mutex<String>,
    prompts: Mutex<Vec<String>>,
    delay: Option<Duration>,
}

impl ScriptedLanguageModel {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            last: Mutex::new(String::new()),
            prompts: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    /// A model that always gives the same reply.
    pub fn always(reply: impl Into<String>) -> Self {
        Self::new([reply.into()])
    }

    /// Sleep before every reply.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Every prompt received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl LanguageModel for ScriptedLanguageModel {
    fn invoke(&self, prompt: &str) -> QuarryResult<String> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(prompt.to_string());
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }

        let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(next) = self
            .replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
        {
            *last = next;
        }
        Ok(last.clone())
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// A model whose every call fails.
#[derive(Debug, Default)]
pub struct FailingLanguageModel;

impl LanguageModel for FailingLanguageModel {
    fn invoke(&self, _prompt: &str) -> QuarryResult<String> {
        Err(LanguageModelError::RequestFailed {
            reason: "model service unreachable".into(),
        }
        .into())
    }

    fn name(&self) -> &str {
        "failing"
    }
}
