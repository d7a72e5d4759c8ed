/*
Copyright 2024, Zep Software, Inc.

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

use std::time::Duration;

use async_trait::async_trait;
use tokio_retry::{strategy::ExponentialBackoff, RetryIf};
use tracing::warn;

use super::config::LlmConfig;
use super::models::Message;
use crate::errors::{LlmError, LlmResult};

/// Trait for LLM clients that can generate text replies
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Generate a reply to a conversation
    async fn generate_response(&self, messages: &[Message], max_tokens: Option<u32>) -> LlmResult<String>;

    /// Single-turn convenience: one system message and one user message
    async fn generate_text(&self, system: &str, user: &str) -> LlmResult<String> {
        let messages = [Message::system(system), Message::user(user)];
        self.generate_response(&messages, None).await
    }
}

/// Shared behaviour of concrete clients: input cleaning and transport retry
pub struct BaseLlmClient {
    pub config: LlmConfig,
    pub retry_base_delay: Duration,
    pub max_retries: usize,
}

impl BaseLlmClient {
    pub fn new(config: LlmConfig) -> Self {
        Self {
            config,
            retry_base_delay: Duration::from_millis(5000),
            max_retries: 4,
        }
    }

    /// Clean input string of invalid unicode and control characters
    pub fn clean_input(&self, input: &str) -> String {
        // Remove zero-width characters and other invisible unicode
        let zero_width_chars = ['\u{200b}', '\u{200c}', '\u{200d}', '\u{feff}', '\u{2060}'];
        let mut cleaned = input.to_string();
        for char in zero_width_chars {
            cleaned = cleaned.replace(char, "");
        }

        // Remove control characters except newlines, returns, and tabs
        cleaned
            .chars()
            .filter(|&c| (c as u32) >= 32 || c == '\n' || c == '\r' || c == '\t')
            .collect()
    }

    /// Clean every message before it goes on the wire
    pub fn prepare_messages(&self, messages: &[Message]) -> Vec<Message> {
        messages
            .iter()
            .map(|message| Message::new(message.role.clone(), self.clean_input(&message.content)))
            .collect()
    }

    /// Execute with retry logic.
    ///
    /// Only transient transport failures are retried; refusals, empty replies
    /// and authentication problems surface immediately.
    pub async fn execute_with_retry<F, Fut, T>(&self, operation: F) -> LlmResult<T>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = LlmResult<T>>,
    {
        let retry_strategy = ExponentialBackoff::from_millis(self.retry_base_delay.as_millis() as u64)
            .max_delay(Duration::from_secs(120))
            .take(self.max_retries);

        let retry_condition = |error: &LlmError| {
            matches!(
                error,
                LlmError::RateLimit | LlmError::Http(_) | LlmError::Timeout { .. }
            )
        };

        RetryIf::spawn(retry_strategy, operation, retry_condition)
            .await
            .map_err(|e| {
                warn!("All retry attempts exhausted: {:?}", e);
                e
            })
    }
}
