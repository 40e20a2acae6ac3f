//! 终端界面：会话状态机加登录页和画廊页

use crate::client::ApiClient;
use crate::routes::user::PublicUser;

mod gallery;
mod login;

pub use gallery::{GRID_COLUMNS, GalleryCommand, GalleryState, GalleryView};
pub use login::LoginView;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    CheckingSession,
    LoggedOut,
    LoggedIn(PublicUser),
}

pub struct App {
    client: ApiClient,
    session: Session,
    login: LoginView,
    gallery: GalleryView,
}

impl App {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            session: Session::CheckingSession,
            login: LoginView::new(),
            gallery: GalleryView::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn login_view(&self) -> &LoginView {
        &self.login
    }

    pub fn gallery(&self) -> &GalleryView {
        &self.gallery
    }

    /// 启动时检查本地令牌；校验失败则删除令牌
    pub async fn check_session(&mut self) {
        if self.client.token().is_none() {
            self.session = Session::LoggedOut;
            return;
        }

        match self.client.verify().await {
            Ok(user) => self.enter_gallery(user),
            Err(e) => {
                tracing::info!("Stored session rejected: {}", e);
                self.client.forget_token();
                self.session = Session::LoggedOut;
            }
        }
    }

    pub async fn submit_login(&mut self, username: &str, password: &str) {
        if let Some(user) = self.login.submit(&self.client, username, password).await {
            self.enter_gallery(user);
        }
    }

    /// 画廊处于加载状态、等待 `load_gallery` 发出请求
    pub fn gallery_pending(&self) -> bool {
        matches!(self.session, Session::LoggedIn(_)) && self.gallery.is_loading()
    }

    pub async fn load_gallery(&mut self) {
        if self.gallery_pending() {
            self.gallery.load(&self.client).await;
        }
    }

    pub async fn logout(&mut self) {
        self.client.logout().await;
        self.session = Session::LoggedOut;
        self.login = LoginView::new();
        self.gallery = GalleryView::new();
    }

    /// 返回 false 表示用户要退出
    pub async fn dispatch(&mut self, command: GalleryCommand) -> bool {
        if !matches!(self.session, Session::LoggedIn(_)) {
            return command != GalleryCommand::Quit;
        }

        match command {
            GalleryCommand::Open(id) => {
                if !self.gallery.open(id) {
                    tracing::debug!("No card #{} in the gallery", id);
                }
            }
            GalleryCommand::Close => self.gallery.close(),
            GalleryCommand::Retry => self.gallery.retry(),
            GalleryCommand::Logout => self.logout().await,
            GalleryCommand::Quit => return false,
        }
        true
    }

    pub fn render(&self) -> String {
        match &self.session {
            Session::CheckingSession => "Loading...\n".to_string(),
            Session::LoggedOut => self.login.render(),
            Session::LoggedIn(user) => self.gallery.render(user),
        }
    }

    fn enter_gallery(&mut self, user: PublicUser) {
        self.session = Session::LoggedIn(user);
        self.gallery = GalleryView::new();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::client::{MemoryTokenStore, TokenStore};
    use crate::spawn_test_server;

    fn admin() -> PublicUser {
        PublicUser {
            id: 1,
            username: "admin".into(),
        }
    }

    #[tokio::test]
    async fn no_stored_token_goes_straight_to_login() {
        let client = ApiClient::new("http://127.0.0.1:1/api", Arc::new(MemoryTokenStore::new()));
        let mut app = App::new(client);
        assert_eq!(app.session(), &Session::CheckingSession);
        assert_eq!(app.render(), "Loading...\n");

        app.check_session().await;
        assert_eq!(app.session(), &Session::LoggedOut);
    }

    #[tokio::test]
    async fn valid_stored_token_restores_session() {
        let base = spawn_test_server().await;
        let token = crate::test_state().sessions.issue(1, "admin").unwrap();
        let store = Arc::new(MemoryTokenStore::with_token(token));
        let mut app = App::new(ApiClient::new(base, store));

        app.check_session().await;
        assert_eq!(app.session(), &Session::LoggedIn(admin()));
        assert!(app.gallery_pending());
        assert!(app.render().contains("Loading flowers..."));

        app.load_gallery().await;
        assert!(!app.gallery_pending());
        assert!(matches!(app.gallery().state(), GalleryState::Loaded(cards) if cards.len() == 100));
    }

    #[tokio::test]
    async fn invalid_stored_token_is_discarded() {
        let base = spawn_test_server().await;
        let store = Arc::new(MemoryTokenStore::with_token("forged.token.value"));
        let mut app = App::new(ApiClient::new(base, store.clone()));

        app.check_session().await;
        assert_eq!(app.session(), &Session::LoggedOut);
        assert_eq!(store.load(), None);
    }

    #[tokio::test]
    async fn login_then_browse_then_logout() {
        let base = spawn_test_server().await;
        let store = Arc::new(MemoryTokenStore::new());
        let mut app = App::new(ApiClient::new(base, store.clone()));
        app.check_session().await;

        app.submit_login("admin", "oops").await;
        assert_eq!(app.session(), &Session::LoggedOut);
        assert_eq!(app.login_view().error(), Some("Invalid username or password"));

        app.submit_login("admin", "password123").await;
        assert_eq!(app.session(), &Session::LoggedIn(admin()));
        assert!(store.load().is_some());
        assert!(app.render().contains("Loading flowers..."));
        app.load_gallery().await;

        assert!(app.dispatch(GalleryCommand::Open(404)).await);
        assert!(app.render().contains("No card #404"));

        assert!(app.dispatch(GalleryCommand::Open(1)).await);
        assert_eq!(app.gallery().selected().map(|c| c.flower.name.as_str()), Some("Rose"));
        assert!(app.dispatch(GalleryCommand::Close).await);
        assert!(app.gallery().selected().is_none());

        assert!(app.dispatch(GalleryCommand::Logout).await);
        assert_eq!(app.session(), &Session::LoggedOut);
        assert_eq!(store.load(), None);
        assert_eq!(app.login_view().error(), None);
    }

    #[tokio::test]
    async fn retry_renders_loading_before_fetching() {
        let base = spawn_test_server().await;
        let store = Arc::new(MemoryTokenStore::new());
        let mut app = App::new(ApiClient::new(base, store.clone()));
        app.session = Session::LoggedIn(admin());

        // 没有令牌，第一次加载失败
        app.load_gallery().await;
        assert!(matches!(app.gallery().state(), GalleryState::Failed(_)));
        assert!(app.render().contains("[r] Retry"));

        store
            .save(&crate::test_state().sessions.issue(1, "admin").unwrap())
            .unwrap();
        assert!(app.dispatch(GalleryCommand::Retry).await);
        assert!(app.gallery_pending());
        let pending = app.render();
        assert!(pending.contains("Loading flowers..."));
        assert!(!pending.contains("[r] Retry"));

        app.load_gallery().await;
        assert!(matches!(app.gallery().state(), GalleryState::Loaded(cards) if cards.len() == 100));
    }

    #[tokio::test]
    async fn logout_transitions_even_if_server_is_gone() {
        let store = Arc::new(MemoryTokenStore::with_token("anything"));
        let mut app = App::new(ApiClient::new("http://127.0.0.1:1/api", store.clone()));
        app.session = Session::LoggedIn(admin());

        app.logout().await;
        assert_eq!(app.session(), &Session::LoggedOut);
        assert_eq!(store.load(), None);
    }

    #[tokio::test]
    async fn quit_ends_the_loop() {
        let client = ApiClient::new("http://127.0.0.1:1/api", Arc::new(MemoryTokenStore::new()));
        let mut app = App::new(client);
        app.session = Session::LoggedIn(admin());
        assert!(!app.dispatch(GalleryCommand::Quit).await);
    }
}
