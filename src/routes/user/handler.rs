use axum::{
    Extension,
    extract::{Json, State, rejection::JsonRejection},
};

use crate::{
    AppState,
    error::AppError,
    utils::{ApiResponse, Claims, success_to_api_response, success_with_message},
};

use super::model::{LoginRequest, LoginResponse, LogoutResponse, PublicUser, VerifyResponse};

const MISSING_CREDENTIALS: &str = "Username and password are required";

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    let Json(req) = payload.map_err(|e| {
        tracing::debug!("Rejected login body: {}", e);
        AppError::BadRequest(MISSING_CREDENTIALS)
    })?;

    // 空字符串与缺失字段同样处理
    let (Some(username), Some(password)) = (
        req.username.filter(|u| !u.is_empty()),
        req.password.filter(|p| !p.is_empty()),
    ) else {
        return Err(AppError::BadRequest(MISSING_CREDENTIALS));
    };

    let Some(user) = state.credentials.find_by_username(&username).cloned() else {
        tracing::warn!("Login failed: unknown user");
        return Err(AppError::InvalidCredentials);
    };

    // bcrypt 计算较重，放到阻塞线程池
    let verified = tokio::task::spawn_blocking({
        let user = user.clone();
        move || user.verify_login(&password)
    })
    .await;

    match verified {
        Ok(Ok(true)) => (),
        Ok(Ok(false)) => {
            tracing::warn!("Login failed: wrong password for {}", user.username);
            return Err(AppError::InvalidCredentials);
        }
        Ok(Err(e)) => {
            tracing::error!("Password verification error: {}", e);
            return Err(AppError::ServerError("Server error during login"));
        }
        Err(e) => {
            tracing::error!("Password verification task failed: {}", e);
            return Err(AppError::ServerError("Server error during login"));
        }
    }

    // 生成 token
    let token = state.sessions.issue(user.id, &user.username).map_err(|e| {
        tracing::error!("Failed to sign token: {}", e);
        AppError::ServerError("Server error during login")
    })?;

    tracing::info!("User {} logged in", user.username);
    Ok(success_with_message(
        "Login successful",
        LoginResponse {
            token,
            user: user.public(),
        },
    ))
}

pub async fn verify(Extension(claims): Extension<Claims>) -> Json<ApiResponse<VerifyResponse>> {
    success_to_api_response(VerifyResponse {
        user: PublicUser::from(claims),
    })
}

/// 服务端无状态，注销只需要客户端删除本地令牌
pub async fn logout() -> Json<ApiResponse<LogoutResponse>> {
    success_with_message("Logout successful", LogoutResponse {})
}
