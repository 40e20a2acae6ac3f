use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// 服务端返回的 `message`，或者响应不是合法 JSON 时的通用消息
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("token storage failed: {0}")]
    Storage(#[from] std::io::Error),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 显示给用户的文本
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Api { message, .. } => message.clone(),
            ClientError::Transport(_) => "Unable to reach the server".to_string(),
            ClientError::Storage(_) => "Unable to store the session locally".to_string(),
        }
    }
}
