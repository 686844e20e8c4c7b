use super::{api_error, ApiError};
use crate::models::{
    FormatCoinsRequest, FormatCoinsResponse, ParseCoinsRequest, ParseCoinsResponse,
};
use crate::services::renderer::{FieldDescriptor, Value};
use crate::state::AppState;
use axum::{extract::State, Json};

pub async fn format_coins(
    State(state): State<AppState>,
    Json(request): Json<FormatCoinsRequest>,
) -> Result<Json<FormatCoinsResponse>, ApiError> {
    let renderer = state
        .textual
        .value_renderer(&FieldDescriptor::coins())
        .map_err(api_error)?;
    let ctx = state.query_context();
    let screens = renderer
        .format(&ctx, &Value::Coins(request.coins))
        .await
        .map_err(api_error)?;

    Ok(Json(FormatCoinsResponse { screens }))
}

pub async fn parse_coins(
    State(state): State<AppState>,
    Json(request): Json<ParseCoinsRequest>,
) -> Result<Json<ParseCoinsResponse>, ApiError> {
    let renderer = state
        .textual
        .value_renderer(&FieldDescriptor::coins())
        .map_err(api_error)?;
    let ctx = state.query_context();
    let coins = match renderer.parse(&ctx, &request.screens).await.map_err(api_error)? {
        Value::Coins(coins) => coins,
        Value::Coin(coin) => vec![coin],
    };

    Ok(Json(ParseCoinsResponse { coins }))
}
