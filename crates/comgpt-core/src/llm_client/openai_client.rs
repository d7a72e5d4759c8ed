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

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::client::{BaseLlmClient, LlmClient};
use super::config::LlmConfig;
use super::models::Message;
use crate::errors::{LlmError, LlmResult};

const DEFAULT_MODEL: &str = "gpt-3.5-turbo-0125";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Serialize)]
struct OpenAiChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
    refusal: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChatResponse {
    #[serde(default)]
    choices: Vec<OpenAiChoice>,
    #[serde(default)]
    error: Option<OpenAiError>,
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    message: String,
}

/// Chat-completions client for OpenAI-compatible endpoints
pub struct OpenAiClient {
    base_client: BaseLlmClient,
    http_client: Client,
    base_url: String,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(config: LlmConfig) -> LlmResult<Self> {
        let api_key = config.api_key.clone().ok_or_else(|| LlmError::Authentication {
            message: "OpenAI API key is required".to_string(),
        })?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::InvalidConfig {
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            base_client: BaseLlmClient::new(config),
            http_client,
            base_url,
            api_key,
        })
    }

    pub fn model(&self) -> &str {
        self.base_client
            .config
            .model
            .as_deref()
            .unwrap_or(DEFAULT_MODEL)
    }

    async fn generate_response_internal(
        &self,
        messages: &[Message],
        max_tokens: Option<u32>,
    ) -> LlmResult<String> {
        let request = OpenAiChatRequest {
            model: self.model(),
            messages,
            temperature: self.base_client.config.temperature,
            max_tokens: max_tokens.unwrap_or(self.base_client.config.max_tokens),
        };

        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .http_client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout {
                        message: e.to_string(),
                    }
                } else {
                    LlmError::Http(e)
                }
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmError::RateLimit);
        }
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let error_text = response.text().await.unwrap_or_default();
            return Err(LlmError::Authentication {
                message: format!("HTTP {} - {}", status, error_text),
            });
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(LlmError::NetworkError {
                message: format!("HTTP {} - {}", status, error_text),
            });
        }

        let body = response.text().await?;
        parse_chat_body(&body)
    }
}

/// Decode a chat-completions body; malformed JSON is an `LlmError::Json`
fn parse_chat_body(body: &str) -> LlmResult<String> {
    let chat_response: OpenAiChatResponse = serde_json::from_str(body)?;
    parse_chat_response(chat_response)
}

fn parse_chat_response(chat_response: OpenAiChatResponse) -> LlmResult<String> {
    if let Some(error) = chat_response.error {
        return Err(LlmError::NetworkError {
            message: error.message,
        });
    }

    let choice = chat_response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::EmptyResponse {
            message: "No choices in response".to_string(),
        })?;

    if let Some(refusal) = choice.message.refusal {
        return Err(LlmError::Refusal { message: refusal });
    }

    debug!("Completion finished: {:?}", choice.finish_reason);

    choice.message.content.ok_or_else(|| LlmError::EmptyResponse {
        message: "No content in response".to_string(),
    })
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn generate_response(&self, messages: &[Message], max_tokens: Option<u32>) -> LlmResult<String> {
        let prepared_messages = self.base_client.prepare_messages(messages);

        self.base_client
            .execute_with_retry(|| self.generate_response_internal(&prepared_messages, max_tokens))
            .await
    }
}
