//! Axum route handlers for the chat API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::chat::{chat, ChatTurn};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

#[derive(Debug, Serialize)]
pub struct CompletionResponse {
    pub result: String,
}

/// POST /api/v1/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<CompletionResponse>, AppError> {
    if request.message.trim().is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }

    let result = chat(&state.gateway, &request.message, &request.history).await?;
    Ok(Json(CompletionResponse { result }))
}
