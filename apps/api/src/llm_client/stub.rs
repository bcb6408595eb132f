//! In-process completion backend for tests. Records every prompt it receives.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{CompletionBackend, LlmError};

pub struct StubBackend {
    prompts: Mutex<Vec<String>>,
    fail_marker: Option<String>,
}

impl StubBackend {
    /// Replies with a padded message naming the prompt's `대상:` line.
    pub fn echo() -> Self {
        Self {
            prompts: Mutex::new(Vec::new()),
            fail_marker: None,
        }
    }

    /// Like `echo`, but fails every prompt containing `marker`.
    pub fn failing_on(marker: &str) -> Self {
        Self {
            prompts: Mutex::new(Vec::new()),
            fail_marker: Some(marker.to_string()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionBackend for StubBackend {
    async fn complete(&self, prompt: &str, _system: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        if let Some(marker) = &self.fail_marker {
            if prompt.contains(marker.as_str()) {
                return Err(LlmError::Api {
                    status: 429,
                    message: "quota exceeded".to_string(),
                });
            }
        }

        let recipient = prompt
            .lines()
            .find_map(|line| line.strip_prefix("대상: "))
            .unwrap_or("unknown");
        Ok(format!("  [{recipient}] 안내 문자입니다.\n"))
    }
}
