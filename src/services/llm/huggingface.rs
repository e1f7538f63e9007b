// SPDX-FileCopyrightText: 2026 reviewdeck contributors
//
// SPDX-License-Identifier: AGPL-3.0-only

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::InferenceProvider;
use crate::config::{Config, PROVIDER_NAME};
use crate::error::{Error, Result};

/// Client for HuggingFace's OpenAI-compatible router. Works against any
/// endpoint that speaks the `/chat/completions` schema.
pub struct HuggingFaceProvider {
    client: Client,
    base_url: String,
    model: String,
    api_token: SecretString,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Deserialize)]
struct AssistantMessage {
    content: String,
}

impl HuggingFaceProvider {
    pub fn new(config: &Config) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            client,
            // Sanitize: remove trailing slashes to avoid //chat/completions
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_token: SecretString::from(config.api_token.clone().unwrap_or_default()),
            temperature: config.temperature,
            max_tokens: config.max_new_tokens,
        }
    }

    fn provider_error(message: impl Into<String>) -> Error {
        Error::Inference {
            provider: PROVIDER_NAME.into(),
            message: message.into(),
        }
    }
}

#[async_trait]
impl InferenceProvider for HuggingFaceProvider {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        debug!(model = %self.model, prompt_chars = prompt.len(), "sending inference request");

        let response = self
            .client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.api_token.expose_secret()),
            )
            .json(&ChatRequest {
                model: self.model.clone(),
                messages: vec![Message {
                    role: "user".into(),
                    content: prompt.to_string(),
                }],
                temperature: self.temperature,
                max_tokens: self.max_tokens,
                stream: false,
            })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Self::provider_error("request timed out")
                } else {
                    Self::provider_error(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Self::provider_error(format!("HTTP {status}: {body}")));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| Self::provider_error(format!("malformed response: {e}")))?;

        let Some(choice) = chat.choices.into_iter().next() else {
            return Err(Self::provider_error("response carried no choices"));
        };

        // Verbatim: the dashboard displays exactly what the model returned
        Ok(choice.message.content)
    }

    async fn verify(&self) -> Result<()> {
        let url = format!("{}/models", self.base_url);

        let response = self
            .client
            .get(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.api_token.expose_secret()),
            )
            .send()
            .await
            .map_err(|e| Self::provider_error(e.to_string()))?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Self::provider_error("invalid API token"));
        }

        Ok(())
    }

    fn name(&self) -> &str {
        PROVIDER_NAME
    }
}
