pub mod book;
pub mod cart;
pub mod user;

use serde::{Deserialize, Serialize};

/// `{status, token}` body of `POST /jwt`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub status: String,
    pub token: String,
}

impl TokenResponse {
    pub fn success(token: String) -> Self {
        Self {
            status: "success".to_string(),
            token,
        }
    }
}

/// `?id=` query shared by the book routes
#[derive(Debug, Default, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}
