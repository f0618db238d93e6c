//! Managed wallet handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::http::auth::CallerIdentity;
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::wallet::WalletOutcome;

pub async fn get(
    State(state): State<AppState>,
    CallerIdentity(external_id): CallerIdentity,
) -> Response {
    let response = match state.wallets.get(&external_id).await {
        Ok(Some(record)) => wallet_ready(&record.address),
        Ok(None) => ApiError::new(
            StatusCode::NOT_FOUND,
            format!("no managed wallet for {external_id}"),
        )
        .into_response(),
        Err(error) => {
            tracing::error!(external_id, error = %error, "Wallet lookup failed");
            ApiError::from(error).into_response()
        }
    };

    metrics::record_http_request("/api/wallet/get", response.status().as_u16());
    response
}

pub async fn create(
    State(state): State<AppState>,
    CallerIdentity(external_id): CallerIdentity,
) -> Response {
    let response = match state.wallets.get_or_create(&external_id).await {
        Ok(WalletOutcome::Ready(record)) => wallet_ready(&record.address),
        Ok(WalletOutcome::NotVisible { attempts }) => ApiError::new(
            StatusCode::GATEWAY_TIMEOUT,
            format!("wallet for {external_id} not available after {attempts} attempts"),
        )
        .into_response(),
        Err(error) => {
            tracing::error!(external_id, error = %error, "Wallet creation failed");
            ApiError::from(error).into_response()
        }
    };

    metrics::record_http_request("/api/wallet/create", response.status().as_u16());
    response
}

fn wallet_ready(address: &str) -> Response {
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "wallet": address,
        })),
    )
        .into_response()
}
