//! Identity service endpoint definitions and request/response types.

use serde::{Deserialize, Serialize};

// ============================================================================
// Endpoint Names
// ============================================================================

/// Exchange credentials for a bearer token.
pub const LOGIN: &str = "login";

/// End the session identified by the bearer token.
pub const LOGOUT: &str = "logout";

/// Describe the account owning the bearer token.
pub const ME: &str = "me";

/// Create a new account.
pub const REGISTER: &str = "register";

// ============================================================================
// Request/Response Types
// ============================================================================

/// Response from login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub username: String,
}

/// Response carrying only a status message (register, logout).
#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    #[serde(default, alias = "message")]
    pub msg: Option<String>,
}

/// Empty JSON object sent as the logout body.
#[derive(Debug, Serialize)]
pub struct EmptyBody {}

/// Error response format.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    #[serde(default, alias = "message")]
    pub msg: Option<String>,
}
