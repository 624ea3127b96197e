//! Savings goal handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    Json,
};

use super::{invalid, read_json};
use crate::{current_user, AppError, AppState, SuccessResponse};
use spendcast_core::models::{NewSavingsGoal, SavingsGoal};

/// GET /api/savings-goals - List the user's goals, newest first
pub async fn list_savings_goals(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<Vec<SavingsGoal>>, AppError> {
    let user = current_user(&state, request.headers())?;

    let goals = state.db.list_savings_goals(user.id)?;

    state.db.log_audit(
        &user.email,
        "list",
        Some("savings_goal"),
        None,
        Some(&format!("returned={}", goals.len())),
    )?;

    Ok(Json(goals))
}

/// GET /api/savings-goals/:id
pub async fn get_savings_goal(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<SavingsGoal>, AppError> {
    let user = current_user(&state, request.headers())?;

    let goal = state
        .db
        .get_savings_goal(user.id, id)?
        .ok_or_else(|| AppError::not_found("Savings goal not found"))?;

    state
        .db
        .log_audit(&user.email, "view", Some("savings_goal"), Some(id), None)?;

    Ok(Json(goal))
}

/// POST /api/savings-goals
pub async fn create_savings_goal(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<(StatusCode, Json<SavingsGoal>), AppError> {
    let user = current_user(&state, request.headers())?;
    let new_goal: NewSavingsGoal = read_json(request).await?;
    new_goal.validate().map_err(invalid)?;

    let id = state.db.insert_savings_goal(user.id, &new_goal)?;

    state.db.log_audit(
        &user.email,
        "create",
        Some("savings_goal"),
        Some(id),
        Some(&format!(
            "name={}, target={:.2}, due={}",
            new_goal.name, new_goal.target_amount, new_goal.target_date
        )),
    )?;

    let goal = state
        .db
        .get_savings_goal(user.id, id)?
        .ok_or_else(|| AppError::internal("Savings goal not found after creation"))?;

    Ok((StatusCode::CREATED, Json(goal)))
}

/// PUT /api/savings-goals/:id
pub async fn update_savings_goal(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<SavingsGoal>, AppError> {
    let user = current_user(&state, request.headers())?;
    let new_goal: NewSavingsGoal = read_json(request).await?;
    new_goal.validate().map_err(invalid)?;

    if !state.db.update_savings_goal(user.id, id, &new_goal)? {
        return Err(AppError::not_found("Savings goal not found"));
    }

    state.db.log_audit(
        &user.email,
        "update",
        Some("savings_goal"),
        Some(id),
        Some(&format!(
            "current={:.2}, target={:.2}",
            new_goal.current_amount, new_goal.target_amount
        )),
    )?;

    let goal = state
        .db
        .get_savings_goal(user.id, id)?
        .ok_or_else(|| AppError::not_found("Savings goal not found"))?;

    Ok(Json(goal))
}

/// DELETE /api/savings-goals/:id
pub async fn delete_savings_goal(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<SuccessResponse>, AppError> {
    let user = current_user(&state, request.headers())?;

    if !state.db.delete_savings_goal(user.id, id)? {
        return Err(AppError::not_found("Savings goal not found"));
    }

    state
        .db
        .log_audit(&user.email, "delete", Some("savings_goal"), Some(id), None)?;

    Ok(Json(SuccessResponse { success: true }))
}
