use std::sync::Arc;

use reqwest::{Method, RequestBuilder, Response};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::json;

use crate::config::ClientConfig;
use crate::routes::flower::{CardResponse, FlowerCard, FlowerType, ListResponse};
use crate::routes::health::HealthResponse;
use crate::routes::user::{LoginResponse, PublicUser, VerifyResponse};
use crate::utils::ApiResponse;

mod error;
mod store;

pub use error::ClientError;
pub use store::{FileTokenStore, MemoryTokenStore, TokenStore};

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// 除登录外的每个请求都附带已保存的令牌
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn TokenStore>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, store: Arc<dyn TokenStore>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            store,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        let store = FileTokenStore::new(config.token_file.clone());
        tracing::debug!("Session token stored at {}", store.path().display());
        Self::new(config.api_url.clone(), Arc::new(store))
    }

    pub fn token(&self) -> Option<String> {
        self.store.load()
    }

    pub fn forget_token(&self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!("Failed to clear stored token: {}", e);
        }
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let response = self
            .http
            .post(self.url("/auth/login"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await?;

        let body: LoginResponse = parse(response, "Login failed").await?;
        self.store.save(&body.token)?;
        tracing::debug!("Stored session token for {}", body.user.username);

        Ok(body)
    }

    /// 本地令牌总是被清除，网络失败也一样
    pub async fn logout(&self) {
        if let Err(e) = self.request(Method::POST, "/auth/logout").send().await {
            tracing::warn!("Logout request failed: {}", e);
        }
        self.forget_token();
    }

    pub async fn verify(&self) -> Result<PublicUser, ClientError> {
        let response = self.request(Method::GET, "/auth/verify").send().await?;
        let body: VerifyResponse = parse(response, "Token verification failed").await?;
        Ok(body.user)
    }

    pub async fn list_cards(&self) -> Result<ListResponse<FlowerCard>, ClientError> {
        let response = self.request(Method::GET, "/flowers").send().await?;
        parse(response, "Failed to fetch flowers").await
    }

    pub async fn get_card(&self, id: u32) -> Result<FlowerCard, ClientError> {
        let response = self
            .request(Method::GET, &format!("/flowers/{}", id))
            .send()
            .await?;
        let body: CardResponse = parse(response, "Failed to fetch flower").await?;
        Ok(body.data)
    }

    pub async fn list_types(&self) -> Result<ListResponse<FlowerType>, ClientError> {
        let response = self.request(Method::GET, "/flowers/types/all").send().await?;
        parse(response, "Failed to fetch flower types").await
    }

    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let response = self.http.get(self.url("/health")).send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|_| ClientError::Api {
            status,
            message: "Health check failed".to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match self.store.load() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

async fn parse<T: DeserializeOwned>(
    response: Response,
    fallback: &'static str,
) -> Result<T, ClientError> {
    let status = response.status();
    let bytes = response.bytes().await?;

    if !status.is_success() {
        let message = serde_json::from_slice::<ErrorBody>(&bytes)
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| fallback.to_string());
        return Err(ClientError::Api {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_slice::<ApiResponse<T>>(&bytes)
        .map(|body| body.data)
        .map_err(|e| {
            tracing::debug!("Malformed response body: {}", e);
            ClientError::Api {
                status: status.as_u16(),
                message: fallback.to_string(),
            }
        })
}
