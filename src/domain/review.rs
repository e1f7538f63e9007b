// SPDX-FileCopyrightText: 2026 reviewdeck contributors
//
// SPDX-License-Identifier: AGPL-3.0-only

use serde::{Deserialize, Serialize};

/// A single code submission. Transient: lives for one request/response
/// cycle, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRequest {
    /// Raw source-code text as submitted by the user
    pub code: String,
}

impl ReviewRequest {
    /// Non-empty input is required before submission.
    pub fn is_blank(&self) -> bool {
        self.code.trim().is_empty()
    }
}

/// A follow-up question about a code submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRequest {
    pub code: String,
    pub question: String,
}

impl QuestionRequest {
    pub fn is_blank(&self) -> bool {
        self.code.trim().is_empty() || self.question.trim().is_empty()
    }
}

/// The model's free-text output, returned to the dashboard verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewReply {
    pub review: String,
    /// Model that produced the text
    pub model: String,
}
