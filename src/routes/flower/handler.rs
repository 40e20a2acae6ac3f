use axum::{
    Extension,
    extract::{Json, Path, State},
};

use crate::{
    AppState,
    error::AppError,
    utils::{ApiResponse, Claims, success_to_api_response},
};

use super::model::{CardResponse, FlowerCard, FlowerType, ListResponse};

pub async fn list_cards(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Json<ApiResponse<ListResponse<FlowerCard>>> {
    tracing::debug!("Listing flower cards for {}", claims.username);
    success_to_api_response(ListResponse::from(state.catalog.cards()))
}

/// 非整数 id 与越界 id 一样视为不存在
pub async fn get_card(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<CardResponse>>, AppError> {
    let card = id
        .parse::<u32>()
        .ok()
        .and_then(|id| state.catalog.get(id))
        .ok_or(AppError::NotFound("Flower card not found"))?;

    Ok(success_to_api_response(CardResponse { data: card.clone() }))
}

pub async fn list_types(
    State(state): State<AppState>,
) -> Json<ApiResponse<ListResponse<FlowerType>>> {
    success_to_api_response(ListResponse::from(state.catalog.types()))
}
