//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod audit;
pub mod goals;
pub mod predictions;
pub mod suggestions;
pub mod transactions;
pub mod users;

// Re-export all handlers for use in router
pub use audit::*;
pub use goals::*;
pub use predictions::*;
pub use suggestions::*;
pub use transactions::*;
pub use users::*;

use axum::extract::Request;
use serde::de::DeserializeOwned;

use crate::{AppError, MAX_BODY_SIZE};

/// Read a JSON body, mapping oversized or malformed input to 400
pub(crate) async fn read_json<T: DeserializeOwned>(request: Request) -> Result<T, AppError> {
    let bytes = axum::body::to_bytes(request.into_body(), MAX_BODY_SIZE)
        .await
        .map_err(|_| AppError::bad_request("Invalid request body"))?;
    serde_json::from_slice(&bytes).map_err(|e| AppError::bad_request(&format!("Invalid JSON: {}", e)))
}

/// Map a model validation failure to 400
pub(crate) fn invalid(err: spendcast_core::Error) -> AppError {
    AppError::bad_request(&err.to_string())
}
