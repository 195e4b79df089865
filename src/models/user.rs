use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct EmailQuery {
    pub email: Option<String>,
}

/// Outcome of register-or-login; same shape whether or not a user was created
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub status: String,
    pub message: String,
    pub email: String,
}

impl RegisterResponse {
    pub fn existing(email: String) -> Self {
        Self {
            status: "success".to_string(),
            message: "user already exists".to_string(),
            email,
        }
    }

    pub fn created(email: String) -> Self {
        Self {
            status: "success".to_string(),
            message: "user created".to_string(),
            email,
        }
    }
}
