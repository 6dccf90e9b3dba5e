//! Axum route handlers for the generation API.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::chat::handlers::CompletionResponse;
use crate::errors::AppError;
use crate::generation::{complete_freeform, generate_resume, job_suggestions, ResumeDraft};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateResumeRequest {
    pub data: ResumeDraft,
}

#[derive(Debug, Deserialize)]
pub struct ColdEmailRequest {
    pub prompt: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSuggestionsRequest {
    pub resume_text: String,
    #[serde(default)]
    pub target_role: Option<String>,
}

/// POST /api/v1/generate/resume
pub async fn handle_generate_resume(
    State(state): State<AppState>,
    Json(request): Json<GenerateResumeRequest>,
) -> Result<Json<CompletionResponse>, AppError> {
    let result = generate_resume(&state.gateway, &request.data).await?;
    Ok(Json(CompletionResponse { result }))
}

/// POST /api/v1/generate/cold-email
pub async fn handle_cold_email(
    State(state): State<AppState>,
    Json(request): Json<ColdEmailRequest>,
) -> Result<Json<CompletionResponse>, AppError> {
    if request.prompt.trim().is_empty() {
        return Err(AppError::Validation("prompt cannot be empty".to_string()));
    }

    let result = complete_freeform(&state.gateway, &request.prompt).await?;
    Ok(Json(CompletionResponse { result }))
}

/// POST /api/v1/generate/job-suggestions
pub async fn handle_job_suggestions(
    State(state): State<AppState>,
    Json(request): Json<JobSuggestionsRequest>,
) -> Result<Json<CompletionResponse>, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "resumeText cannot be empty".to_string(),
        ));
    }

    let result = job_suggestions(
        &state.gateway,
        &request.resume_text,
        request.target_role.as_deref(),
    )
    .await?;
    Ok(Json(CompletionResponse { result }))
}
