//! Identity handlers

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    Json,
};
use serde::Serialize;

use crate::{current_user, get_user_email, AppError, AppState, AuthMethod};
use spendcast_core::models::User;

/// Response for the /api/me endpoint
#[derive(Serialize)]
pub struct MeResponse {
    #[serde(flatten)]
    pub user: User,
    /// How the user was identified
    pub auth_method: AuthMethod,
}

/// GET /api/me - The acting user
pub async fn get_me(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<MeResponse>, AppError> {
    let (_, auth_method) = get_user_email(request.headers());
    let user = current_user(&state, request.headers())?;

    Ok(Json(MeResponse { user, auth_method }))
}
