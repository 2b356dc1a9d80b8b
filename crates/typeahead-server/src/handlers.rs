//! `POST /api/search` and the error → status mapping.

use crate::client::ClientKey;
use crate::AppState;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::RETRY_AFTER;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use std::time::Duration;
use typeahead_core::{SearchError, SearchResponse};

/// Request body. A missing `search` field is the same as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub search: Option<String>,
}

impl SearchRequest {
    pub fn parse(body: &[u8]) -> Result<Self, SearchError> {
        serde_json::from_slice(body).map_err(|err| SearchError::malformed(err.to_string()))
    }
}

pub async fn search(
    State(state): State<AppState>,
    client: ClientKey,
    body: Bytes,
) -> Result<Json<SearchResponse>, ApiError> {
    let request = SearchRequest::parse(&body)?;
    let response = state
        .service
        .handle(request.search.as_deref(), client.as_str())?;
    Ok(Json(response))
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// [`SearchError`] as an HTTP response. Bodies are plain text and never carry
/// internal detail.
#[derive(Debug)]
pub struct ApiError(pub SearchError);

impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            SearchError::RateLimited(err) => (
                StatusCode::TOO_MANY_REQUESTS,
                [(RETRY_AFTER, retry_after_secs(err.retry_after).to_string())],
                "Too Many Requests",
            )
                .into_response(),
            SearchError::MalformedRequest(detail) => {
                tracing::debug!(%detail, "rejected malformed request body");
                (StatusCode::BAD_REQUEST, "Malformed request body").into_response()
            }
            SearchError::Internal(detail) => {
                tracing::error!(%detail, "internal error while searching");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong, we will look into it",
                )
                    .into_response()
            }
        }
    }
}

/// Whole seconds, rounded up, never below one.
fn retry_after_secs(wait: Duration) -> u64 {
    let secs = wait.as_secs() + u64::from(wait.subsec_nanos() > 0);
    secs.max(1)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
