//! Token operation handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::http::auth::CallerIdentity;
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::platform::types::{OperationError, TransactionHandle};

/// Body shared by mint, burn and transfer.
#[derive(Debug, Deserialize)]
pub struct TokenOperationRequest {
    pub token_id: u64,
    pub recipient: String,
    pub amount: u64,
}

pub async fn mint(
    State(state): State<AppState>,
    CallerIdentity(caller): CallerIdentity,
    Json(request): Json<TokenOperationRequest>,
) -> Response {
    let result = state
        .tokens
        .mint(request.token_id, &request.recipient, request.amount)
        .await;
    respond("/api/token/mint", "Mint", &caller, result)
}

pub async fn burn(
    State(state): State<AppState>,
    CallerIdentity(caller): CallerIdentity,
    Json(request): Json<TokenOperationRequest>,
) -> Response {
    let result = state
        .tokens
        .burn(request.token_id, &request.recipient, request.amount)
        .await;
    respond("/api/token/burn", "Burn", &caller, result)
}

pub async fn transfer(
    State(state): State<AppState>,
    CallerIdentity(caller): CallerIdentity,
    Json(request): Json<TokenOperationRequest>,
) -> Response {
    let result = state
        .tokens
        .transfer(request.token_id, &request.recipient, request.amount)
        .await;
    respond("/api/token/transfer", "Transfer", &caller, result)
}

/// Acknowledge an accepted submission or surface the failure.
///
/// 202 is deliberate: acceptance by the platform is not a finalization
/// guarantee.
fn respond(
    route: &'static str,
    operation: &'static str,
    caller: &str,
    result: Result<TransactionHandle, OperationError>,
) -> Response {
    match result {
        Ok(handle) => {
            metrics::record_http_request(route, StatusCode::ACCEPTED.as_u16());
            (
                StatusCode::ACCEPTED,
                Json(json!({
                    "success": true,
                    "request_id": handle.to_string(),
                })),
            )
                .into_response()
        }
        Err(error) => {
            tracing::error!(caller, error = %error, "{operation} failed");
            let api_error = ApiError::from(error);
            metrics::record_http_request(route, api_error.status.as_u16());
            api_error.into_response()
        }
    }
}
