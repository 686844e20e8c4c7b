use crate::error::{ResolveError, TextualError};
use crate::models::ErrorResponse;
use crate::state::AppState;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

pub mod metadata;
pub mod textual;

/// Routes of the review service, without middleware.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/textual/format", post(textual::format_coins))
        .route("/api/textual/parse", post(textual::parse_coins))
        .route("/api/metadata/*denom", get(metadata::get_metadata))
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn status_for(err: &TextualError) -> StatusCode {
    match err {
        TextualError::MetadataNotFound { .. } => StatusCode::NOT_FOUND,
        TextualError::Resolver(ResolveError::DeadlineExceeded) => StatusCode::GATEWAY_TIMEOUT,
        TextualError::Resolver(ResolveError::Cancelled) => StatusCode::SERVICE_UNAVAILABLE,
        TextualError::Resolver(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

pub fn api_error(err: TextualError) -> ApiError {
    let status = status_for(&err);
    if status.is_server_error() {
        tracing::error!("Metadata lookup failed: {}", err);
    } else {
        tracing::warn!("Rejected request: {}", err);
    }
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}
