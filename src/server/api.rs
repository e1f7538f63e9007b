// SPDX-FileCopyrightText: 2026 reviewdeck contributors
//
// SPDX-License-Identifier: AGPL-3.0-only

//! JSON API handlers behind the dashboard page.

use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::{QuestionRequest, ReviewReply, ReviewRequest};
use crate::services::prompt;

use super::AppState;
use super::error::{ApiError, ApiResult};

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub model: String,
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        model: state.config.model.clone(),
    })
}

/// One submission, one outbound inference call, one reply. Empty and
/// oversize submissions are rejected before anything leaves the process.
pub async fn submit_review(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ReviewRequest>,
) -> ApiResult<Json<ReviewReply>> {
    if request.is_blank() {
        return Err(ApiError::Validation("code must not be empty".into()));
    }
    check_size(request.code.len(), state.config.max_code_chars)?;

    debug!(code_chars = request.code.len(), "review submission accepted");

    let review = run_inference(&state, &prompt::review_prompt(&request.code)).await?;

    Ok(Json(ReviewReply {
        review,
        model: state.config.model.clone(),
    }))
}

/// Free-form question against a code submission. Same contract as
/// `submit_review`, different instruction text.
pub async fn ask_question(
    State(state): State<Arc<AppState>>,
    Json(request): Json<QuestionRequest>,
) -> ApiResult<Json<ReviewReply>> {
    if request.is_blank() {
        return Err(ApiError::Validation(
            "code and question must not be empty".into(),
        ));
    }
    check_size(request.code.len(), state.config.max_code_chars)?;

    debug!(
        code_chars = request.code.len(),
        question_chars = request.question.len(),
        "question submission accepted"
    );

    let review = run_inference(
        &state,
        &prompt::question_prompt(&request.code, &request.question),
    )
    .await?;

    Ok(Json(ReviewReply {
        review,
        model: state.config.model.clone(),
    }))
}

fn check_size(code_chars: usize, max_code_chars: usize) -> ApiResult<()> {
    if code_chars > max_code_chars {
        return Err(ApiError::PayloadTooLarge);
    }
    Ok(())
}

async fn run_inference(state: &AppState, prompt: &str) -> ApiResult<String> {
    state.provider.complete(prompt).await.map_err(|e| {
        warn!(provider = state.provider.name(), error = %e, "inference call failed");
        ApiError::from(e)
    })
}
