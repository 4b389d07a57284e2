use std::sync::Arc;

use axum::{Json, body::Bytes, extract::State};
use serde_json::{Value, json};
use tracing::info;

use super::{error::AppError, state::AppState};

/// `POST /api/feedback` with body `{ "feedback": "<text>" }`.
pub async fn feedback_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let payload: Value = serde_json::from_slice(&body)
        .map_err(|e| AppError::Internal(format!("malformed body: {e}")))?;

    if payload.is_null() {
        return Err(AppError::Internal("body is null".to_string()));
    }

    let feedback = match payload.get("feedback") {
        Some(Value::String(text)) if !text.is_empty() => text,
        _ => return Err(AppError::InvalidFeedback),
    };

    state.log.append(feedback).await?;
    info!("Saved {} chars of feedback", feedback.chars().count());

    Ok(Json(json!({ "success": true })))
}
