pub mod auth;

pub use auth::{authorize, require_bearer, AuthUser};
