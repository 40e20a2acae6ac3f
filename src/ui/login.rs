use console::style;

use crate::client::ApiClient;
use crate::routes::user::PublicUser;

const MISSING_FIELDS: &str = "Username and password are required";

#[derive(Debug, Default)]
pub struct LoginView {
    error: Option<String>,
}

impl LoginView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// 失败时错误留在表单内，不离开登录页
    pub async fn submit(
        &mut self,
        client: &ApiClient,
        username: &str,
        password: &str,
    ) -> Option<PublicUser> {
        if username.is_empty() || password.is_empty() {
            self.error = Some(MISSING_FIELDS.to_string());
            return None;
        }

        match client.login(username, password).await {
            Ok(response) => {
                self.error = None;
                Some(response.user)
            }
            Err(e) => {
                tracing::debug!("Login rejected: {}", e);
                self.error = Some(e.user_message());
                None
            }
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("{}\n", style("🌸 My Flower Cards").bold()));
        out.push_str("Please login to view the flower gallery\n");
        if let Some(error) = &self.error {
            out.push_str(&format!("\n{}\n", style(error).red()));
        }
        out.push_str(&format!(
            "\n{}\n",
            style("Hint: username: admin | password: password123").dim()
        ));
        out
    }
}
