use serde::{Deserialize, Serialize};

use crate::utils::{Claims, verify_password};

/// bcrypt(cost 10) of the demo account password
const ADMIN_PASSWORD_HASH: &str = "$2b$10$99gQeIpXMHqW/ujizFreouy9Aq0DHiIJPQeX7ZWUgqjHNU2HD4Muu";

#[derive(Debug, Clone)]
pub struct User {
    pub id: u64,
    pub username: String,
    password_hash: String,
}

impl User {
    pub fn new(id: u64, username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            password_hash: password_hash.into(),
        }
    }

    pub fn verify_login(&self, password: &str) -> Result<bool, bcrypt::BcryptError> {
        verify_password(password, &self.password_hash)
    }

    pub fn public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            username: self.username.clone(),
        }
    }
}

/// 进程启动时创建，之后只读
#[derive(Debug, Clone)]
pub struct CredentialStore {
    users: Vec<User>,
}

impl CredentialStore {
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    pub fn find_by_username(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|u| u.username == username)
    }
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new(vec![User::new(1, "admin", ADMIN_PASSWORD_HASH)])
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: u64,
    pub username: String,
}

impl From<Claims> for PublicUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.id,
            username: claims.username,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: PublicUser,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub user: PublicUser,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LogoutResponse {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_store_holds_only_admin() {
        let store = CredentialStore::default();
        let admin = store.find_by_username("admin").unwrap();
        assert_eq!(admin.public(), PublicUser { id: 1, username: "admin".into() });
        assert!(store.find_by_username("Admin").is_none());
        assert!(store.find_by_username("").is_none());
    }

    #[test]
    fn admin_password_checks_against_hash() {
        let store = CredentialStore::default();
        let admin = store.find_by_username("admin").unwrap();
        assert!(admin.verify_login("password123").unwrap());
        assert!(!admin.verify_login("password124").unwrap());
    }

    #[test]
    fn public_view_never_serializes_hash() {
        let user = User::new(7, "rose", ADMIN_PASSWORD_HASH);
        let json = serde_json::to_string(&user.public()).unwrap();
        assert_eq!(json, r#"{"id":7,"username":"rose"}"#);
    }
}
