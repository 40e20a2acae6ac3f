pub mod flower;
pub mod health;
pub mod user;
