// SPDX-FileCopyrightText: 2026 reviewdeck contributors
// SPDX-License-Identifier: AGPL-3.0-only

use async_trait::async_trait;

pub mod huggingface;

use crate::config::Config;
use crate::error::Result;

#[async_trait]
pub trait InferenceProvider: Send + Sync {
    /// Send one prompt to the remote endpoint and return the model's text
    /// output. Single attempt; no retry.
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Connectivity and credential probe. Never called on the request path.
    async fn verify(&self) -> Result<()>;

    fn name(&self) -> &str;
}

pub fn create_provider(config: &Config) -> Box<dyn InferenceProvider> {
    Box::new(huggingface::HuggingFaceProvider::new(config))
}
