use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::SecurityConfig;

/// Upper bound on token lifetime (100 years)
const MAX_EXPIRY_HOURS: u64 = 24 * 365 * 100;

/// Token claims: the caller-supplied payload plus issue and expiry timestamps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(flatten)]
    pub payload: Map<String, Value>,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(mut payload: Map<String, Value>, expiry: Duration) -> Self {
        let now = Utc::now();
        payload.remove("iat");
        payload.remove("exp");

        Self {
            payload,
            iat: now.timestamp(),
            exp: (now + expiry).timestamp(),
        }
    }
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Token payload must be a JSON object")]
    InvalidPayload,

    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Invalid JWT secret")]
    InvalidSecret,

    #[error("Invalid JWT token: {0}")]
    Verification(String),
}

/// HS256 signing and verification keys derived from the process-wide secret
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiry: Duration,
}

impl JwtKeys {
    pub fn new(secret: &str, expiry_hours: u64) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::InvalidSecret);
        }

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            expiry: Duration::hours(expiry_hours.min(MAX_EXPIRY_HOURS) as i64),
        })
    }

    pub fn from_config(security: &SecurityConfig) -> Result<Self, JwtError> {
        Self::new(&security.jwt_secret, security.jwt_expiry_hours)
    }

    /// Sign an arbitrary JSON object with the configured expiry
    pub fn issue(&self, payload: Value) -> Result<String, JwtError> {
        let Value::Object(payload) = payload else {
            return Err(JwtError::InvalidPayload);
        };
        self.sign(&Claims::new(payload, self.expiry))
    }

    pub fn sign(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&Header::default(), claims, &self.encoding).map_err(|e| JwtError::TokenGeneration(e.to_string()))
    }

    /// Verify signature and expiry, returning the decoded claims
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        let validation = Validation::default();

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| JwtError::Verification(e.to_string()))
    }
}
