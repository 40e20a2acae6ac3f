use std::env;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;

const DEFAULT_API_URL: &str = "http://localhost:5000/api";

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    pub jwt_secret: String,
    pub jwt_expiration_secs: u64,
    pub server_host: String,
    pub server_port: u16,
    pub api_base_uri: String,
}

impl Config {
    /// 签名密钥必须由外部提供，缺失或为空时启动失败
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET")?;
        if jwt_secret.trim().is_empty() {
            return Err(env::VarError::NotPresent);
        }

        let jwt_expiration = env::var("JWT_EXPIRATION")
            .ok()
            .and_then(|v| v.trim_end_matches('h').parse::<u64>().ok())
            .unwrap_or(24);

        Ok(Config {
            jwt_secret,
            jwt_expiration_secs: jwt_expiration * 3600,
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            server_port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            api_base_uri: env::var("API_BASE_URI").unwrap_or_else(|_| "/api".into()),
        })
    }

    pub fn jwt_expiration(&self) -> Duration {
        Duration::from_secs(self.jwt_expiration_secs)
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub token_file: PathBuf,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let api_url = env::var("API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| DEFAULT_API_URL.into());

        let token_file = env::var("TOKEN_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_token_file());

        ClientConfig {
            api_url,
            token_file,
        }
    }
}

fn default_token_file() -> PathBuf {
    ProjectDirs::from("", "", "flower-cards")
        .map(|dirs| dirs.data_dir().join("token"))
        .unwrap_or_else(|| PathBuf::from(".flower-cards-token"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiration_is_expressed_in_seconds() {
        let config = Config {
            jwt_secret: "s3cret".into(),
            jwt_expiration_secs: 24 * 3600,
            server_host: "127.0.0.1".into(),
            server_port: 5000,
            api_base_uri: "/api".into(),
        };
        assert_eq!(config.jwt_expiration(), Duration::from_secs(86_400));
    }

    #[test]
    fn default_token_file_is_named_token() {
        let path = default_token_file();
        assert!(path.ends_with("token") || path.ends_with(".flower-cards-token"));
    }
}
