//! Authentication boundary.
//!
//! Two collaborators meet here. The application-key gate authenticates the
//! calling frontend against the configured key. Session verification lives
//! upstream: the session-terminating gateway forwards the verified user
//! identity in a trusted header, which [`CallerIdentity`] extracts.

use axum::body::Body;
use axum::extract::{FromRequestParts, State};
use axum::http::request::Parts;
use axum::http::{header, Request, StatusCode};
use axum::middleware::Next;
use axum::response::Response;

use crate::http::response::ApiError;
use crate::http::server::AppState;

/// Header carrying the verified caller identity, set by the upstream
/// gateway after session verification.
pub const IDENTITY_HEADER: &str = "x-authenticated-user";

/// Reject requests that do not present the application key.
pub async fn require_app_key(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let presented = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    match presented {
        Some(value) if value == format!("Bearer {}", state.app_key) => Ok(next.run(request).await),
        _ => Err(ApiError::new(
            StatusCode::UNAUTHORIZED,
            "invalid application key",
        )),
    }
}

/// The verified external identity of the caller (an email-like string),
/// used as the wallet external id.
pub struct CallerIdentity(pub String);

impl<S> FromRequestParts<S> for CallerIdentity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(IDENTITY_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .map(|value| CallerIdentity(value.to_string()))
            .ok_or_else(|| ApiError::new(StatusCode::UNAUTHORIZED, "caller identity missing"))
    }
}
