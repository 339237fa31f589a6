//! User profile record.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Profile of the authenticated user.
///
/// Login produces a minimal profile holding only the username; the whoami
/// endpoint may return a fuller record. Fields beyond `username` and `id`
/// are kept in `extra` so the stored record round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Account username.
    pub username: String,

    /// Server-side account identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Any other fields returned by the identity service.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserProfile {
    /// Create a minimal profile holding only a username.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            id: None,
            extra: Map::new(),
        }
    }

    /// Parse a profile from its persisted JSON form.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Serialize the profile for persistence.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
