mod handler;
mod model;

pub use handler::{login, logout, verify};
pub use model::{
    CredentialStore, LoginRequest, LoginResponse, LogoutResponse, PublicUser, User,
    VerifyResponse,
};
