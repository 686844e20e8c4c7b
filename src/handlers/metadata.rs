use super::{api_error, ApiError};
use crate::error::TextualError;
use crate::models::DenomMetadata;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::Json;

pub async fn get_metadata(
    State(state): State<AppState>,
    Path(denom): Path<String>,
) -> Result<Json<DenomMetadata>, ApiError> {
    let ctx = state.query_context();
    let metadata = state
        .textual
        .resolver()
        .by_base(&ctx, &denom)
        .await
        .map_err(|e| api_error(TextualError::from(e)))?;

    Ok(Json(metadata))
}
