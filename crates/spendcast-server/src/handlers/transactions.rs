//! Transaction handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use super::{invalid, read_json};
use crate::{current_user, AppError, AppState, SuccessResponse, MAX_PAGE_LIMIT};
use spendcast_core::models::{NewTransaction, Transaction, TransactionType};

/// Query parameters for listing transactions
#[derive(Debug, Deserialize)]
pub struct TransactionQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
    /// Only income or only expenses
    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,
}

fn default_limit() -> i64 {
    50
}

#[derive(Serialize)]
pub struct TransactionResponse {
    pub transactions: Vec<Transaction>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

/// GET /api/transactions - List the user's transactions, newest first
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TransactionQuery>,
    request: Request,
) -> Result<Json<TransactionResponse>, AppError> {
    let user = current_user(&state, request.headers())?;

    // Input validation: clamp pagination parameters
    let limit = params.limit.clamp(1, MAX_PAGE_LIMIT);
    let offset = params.offset.max(0);

    let transactions =
        state
            .db
            .list_transactions(user.id, params.transaction_type, limit, offset)?;
    let total = state.db.count_transactions(user.id, params.transaction_type)?;

    state.db.log_audit(
        &user.email,
        "list",
        Some("transaction"),
        None,
        Some(&format!(
            "limit={}, offset={}, type={:?}, returned={}",
            limit,
            offset,
            params.transaction_type,
            transactions.len()
        )),
    )?;

    Ok(Json(TransactionResponse {
        transactions,
        total,
        limit,
        offset,
    }))
}

/// GET /api/transactions/:id - Get a single transaction
pub async fn get_transaction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<Transaction>, AppError> {
    let user = current_user(&state, request.headers())?;

    let transaction = state
        .db
        .get_transaction(user.id, id)?
        .ok_or_else(|| AppError::not_found("Transaction not found"))?;

    state
        .db
        .log_audit(&user.email, "view", Some("transaction"), Some(id), None)?;

    Ok(Json(transaction))
}

/// POST /api/transactions - Record a transaction
pub async fn create_transaction(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<(StatusCode, Json<Transaction>), AppError> {
    let user = current_user(&state, request.headers())?;
    let new_tx: NewTransaction = read_json(request).await?;
    new_tx.validate().map_err(invalid)?;

    let id = state.db.insert_transaction(user.id, &new_tx)?;

    state.db.log_audit(
        &user.email,
        "create",
        Some("transaction"),
        Some(id),
        Some(&format!(
            "type={}, amount={:.2}, category={}, date={}",
            new_tx.transaction_type, new_tx.amount, new_tx.category, new_tx.date
        )),
    )?;

    let transaction = state
        .db
        .get_transaction(user.id, id)?
        .ok_or_else(|| AppError::internal("Transaction not found after creation"))?;

    Ok((StatusCode::CREATED, Json(transaction)))
}

/// PUT /api/transactions/:id - Replace a transaction
pub async fn update_transaction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<Transaction>, AppError> {
    let user = current_user(&state, request.headers())?;
    let new_tx: NewTransaction = read_json(request).await?;
    new_tx.validate().map_err(invalid)?;

    if !state.db.update_transaction(user.id, id, &new_tx)? {
        return Err(AppError::not_found("Transaction not found"));
    }

    state.db.log_audit(
        &user.email,
        "update",
        Some("transaction"),
        Some(id),
        Some(&format!(
            "type={}, amount={:.2}, category={}, date={}",
            new_tx.transaction_type, new_tx.amount, new_tx.category, new_tx.date
        )),
    )?;

    let transaction = state
        .db
        .get_transaction(user.id, id)?
        .ok_or_else(|| AppError::not_found("Transaction not found"))?;

    Ok(Json(transaction))
}

/// DELETE /api/transactions/:id - Delete a transaction
pub async fn delete_transaction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<SuccessResponse>, AppError> {
    let user = current_user(&state, request.headers())?;

    if !state.db.delete_transaction(user.id, id)? {
        return Err(AppError::not_found("Transaction not found"));
    }

    state
        .db
        .log_audit(&user.email, "delete", Some("transaction"), Some(id), None)?;

    Ok(Json(SuccessResponse { success: true }))
}
