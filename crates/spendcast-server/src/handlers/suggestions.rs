//! AI suggestion handlers

use std::sync::Arc;

use axum::{
    extract::{Query, Request, State},
    Json,
};
use chrono::Local;
use serde::Serialize;

use super::PredictionQuery;
use crate::{current_user, AppError, AppState};
use spendcast_core::suggestions::generate_suggestions;

#[derive(Debug, Serialize)]
pub struct SuggestionResponse {
    pub suggestions: Vec<String>,
}

/// GET /api/ai-suggestions - Three budgeting suggestions from recent spending
///
/// Returns an empty list when no AI backend is configured or it fails.
pub async fn get_ai_suggestions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PredictionQuery>,
    request: Request,
) -> Result<Json<SuggestionResponse>, AppError> {
    let user = current_user(&state, request.headers())?;
    let today = params.today.unwrap_or_else(|| Local::now().date_naive());

    let suggestions = generate_suggestions(&state.db, state.ai.as_ref(), user.id, today).await?;

    state.db.log_audit(
        &user.email,
        "suggest",
        Some("budget"),
        None,
        Some(&format!("returned={}", suggestions.len())),
    )?;

    Ok(Json(SuggestionResponse { suggestions }))
}
