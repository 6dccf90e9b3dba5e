//! Axum route handlers for the analysis API. Handlers validate the request
//! shape and delegate; all analysis semantics live in the orchestrator.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::analysis::orchestrator::{
    analyze, analyze_gap, analyze_realtime, AnalysisResult, RealtimeAnalysisResult,
};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub resume_text: String,
    #[serde(default)]
    pub job_role: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GapAnalysisRequest {
    pub resume_text: String,
    pub job_description: String,
}

/// POST /api/v1/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisResult>, AppError> {
    let result = analyze(
        &state.gateway,
        &request.resume_text,
        request.job_role.as_deref(),
    )
    .await?;
    Ok(Json(result))
}

/// POST /api/v1/analyze/realtime
pub async fn handle_analyze_realtime(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<RealtimeAnalysisResult>, AppError> {
    let result = analyze_realtime(
        &state.gateway,
        &request.resume_text,
        request.job_role.as_deref(),
    )
    .await?;
    Ok(Json(result))
}

/// POST /api/v1/analyze/job-description
///
/// Serializes the no-result case as `{}` — this path has no synthesized
/// fallback, unlike the other two.
pub async fn handle_analyze_gap(
    State(state): State<AppState>,
    Json(request): Json<GapAnalysisRequest>,
) -> Result<Json<Value>, AppError> {
    let result = analyze_gap(
        &state.gateway,
        &request.resume_text,
        &request.job_description,
    )
    .await?;

    let body = match result {
        Some(analysis) => serde_json::to_value(analysis).map_err(anyhow::Error::from)?,
        None => json!({}),
    };
    Ok(Json(body))
}
