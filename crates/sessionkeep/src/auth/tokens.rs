//! Bearer token type.

use std::fmt;

/// An opaque bearer credential issued by the identity service.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    /// Create a new token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token value for use in authorization headers or persistence.
    ///
    /// # Security
    ///
    /// Use only when constructing HTTP authorization headers or writing the
    /// session to its persistence backend.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the token holds no credential.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Hide token value in Debug output
impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Token").field(&"[REDACTED]").finish()
    }
}
