//! Expense projection handler

use std::sync::Arc;

use axum::{
    extract::{Query, Request, State},
    Json,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;

use crate::{current_user, AppError, AppState};
use spendcast_core::forecast::ExpenseForecast;

/// Query parameters for the projection
#[derive(Debug, Deserialize)]
pub struct PredictionQuery {
    /// Reference date (YYYY-MM-DD), defaults to the server's local date
    pub today: Option<NaiveDate>,
}

/// GET /api/expense-predictions - Accumulated spend for this week, month and year
///
/// Users without expense history get three empty lists.
pub async fn get_expense_predictions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PredictionQuery>,
    request: Request,
) -> Result<Json<ExpenseForecast>, AppError> {
    let user = current_user(&state, request.headers())?;
    let today = params.today.unwrap_or_else(|| Local::now().date_naive());

    let records = state.db.list_expense_records(user.id)?;
    let forecast = state.projector.forecast(&records, today)?;

    state.db.log_audit(
        &user.email,
        "predict",
        Some("expense"),
        None,
        Some(&format!("today={}, records={}", today, records.len())),
    )?;

    Ok(Json(forecast))
}
