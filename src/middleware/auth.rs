use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
    typed_header::TypedHeaderRejection,
};

use crate::{AppState, error::AppError};

/// 校验 `Authorization: Bearer <token>`，通过后把 `Claims` 放入请求扩展
pub async fn auth_middleware(
    State(state): State<AppState>,
    bearer: Result<TypedHeader<Authorization<Bearer>>, TypedHeaderRejection>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let TypedHeader(Authorization(bearer)) = bearer.map_err(|rejection| {
        if rejection.is_missing() {
            AppError::Unauthorized
        } else {
            AppError::InvalidToken
        }
    })?;

    let claims = state.sessions.verify(bearer.token())?;
    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}
