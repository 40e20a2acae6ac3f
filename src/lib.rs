use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use config::Config;
use routes::{flower::Catalog, user::CredentialStore};
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer};
use utils::SessionIssuer;

pub mod client;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod ui;
pub mod utils;

/// 启动时构建一次，请求之间只读共享
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub credentials: Arc<CredentialStore>,
    pub catalog: Arc<Catalog>,
    pub sessions: Arc<SessionIssuer>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let sessions = SessionIssuer::new(&config.jwt_secret, config.jwt_expiration());
        Self {
            config: Arc::new(config),
            credentials: Arc::new(CredentialStore::default()),
            catalog: Arc::new(Catalog::default()),
            sessions: Arc::new(sessions),
        }
    }
}

pub fn app(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(routes::health::health))
        .route("/auth/login", post(routes::user::login))
        .route("/auth/logout", post(routes::user::logout));

    let protected_routes = Router::new()
        .route("/auth/verify", get(routes::user::verify))
        .route("/flowers", get(routes::flower::list_cards))
        .route("/flowers/types/all", get(routes::flower::list_types))
        .route("/flowers/{id}", get(routes::flower::get_card))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth_middleware,
        ));

    let api = Router::new().merge(public_routes).merge(protected_routes);
    let base = state.config.api_base_uri.trim_end_matches('/');
    let router = if base.is_empty() {
        api
    } else {
        Router::new().nest(base, api)
    };

    router
        .layer(
            ServiceBuilder::new()
                .layer(CorsLayer::permissive())
                .layer(axum::middleware::from_fn(middleware::log_errors))
                .layer(CatchPanicLayer::custom(middleware::panic_response)),
        )
        .with_state(state)
}

#[cfg(test)]
pub(crate) fn test_config() -> Config {
    Config {
        jwt_secret: "test-secret".into(),
        jwt_expiration_secs: 24 * 3600,
        server_host: "127.0.0.1".into(),
        server_port: 0,
        api_base_uri: "/api".into(),
    }
}

#[cfg(test)]
pub(crate) fn test_state() -> AppState {
    AppState::new(test_config())
}

/// 在随机端口上启动服务，返回 API 基础地址
#[cfg(test)]
pub(crate) async fn spawn_test_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("test listener address");
    tokio::spawn(async move {
        axum::serve(listener, app(test_state()))
            .await
            .expect("test server");
    });
    format!("http://{}/api", addr)
}
