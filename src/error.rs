use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    BadRequest(&'static str),
    InvalidCredentials,
    Unauthorized,
    InvalidToken,
    NotFound(&'static str),
    /// 只携带可以安全返回给调用方的消息，细节在服务端日志中
    ServerError(&'static str),
}

#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    message: &'static str,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::Unauthorized | AppError::InvalidToken => {
                StatusCode::UNAUTHORIZED
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            AppError::BadRequest(message)
            | AppError::NotFound(message)
            | AppError::ServerError(message) => *message,
            AppError::InvalidCredentials => "Invalid username or password",
            AppError::Unauthorized => "No token provided",
            AppError::InvalidToken => "Invalid token",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            success: false,
            message: self.message(),
        });

        (self.status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_taxonomy() {
        assert_eq!(AppError::BadRequest("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InvalidCredentials.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::InvalidToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::NotFound("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::ServerError("x").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn response_carries_status_and_message() {
        let response = AppError::NotFound("Flower card not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
