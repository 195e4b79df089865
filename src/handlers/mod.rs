// handlers/mod.rs - Two-tier handler layout
//
// Public (no auth) → Protected (bearer token required, see middleware::auth)
pub mod protected; // Mutating book routes behind the authorization gate
pub mod public; // Reads, users, cart, token issuance

use crate::error::ApiError;
use crate::store::DocumentId;

/// Parse a path or query identifier, rejecting anything that is not a store id
pub(crate) fn parse_id(raw: &str) -> Result<DocumentId, ApiError> {
    Ok(DocumentId::parse(raw)?)
}

/// Treat absent and blank parameters the same way
pub(crate) fn required(value: Option<String>, name: &str) -> Result<String, ApiError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::bad_request(format!("{} is required", name)))
}
