//! Error types for the sessionkeep library.
//!
//! This module provides a unified error type with explicit variants for
//! transport, protocol, persistence, and input validation errors.

use std::fmt;
use thiserror::Error;

/// Message shown to the user when a login fails without a server message.
pub const GENERIC_LOGIN_FAILURE: &str = "Login failed. Please try again.";

/// The unified error type for sessionkeep operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Non-success responses from the identity service.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Failures reading or writing the persistence backend.
    #[error("persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// Input validation errors (invalid service URL, malformed data).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns true if the identity service rejected the presented credential.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::Protocol(e) if e.is_auth_error())
    }

    /// Returns the human-readable message supplied by the identity service, if any.
    pub fn service_message(&self) -> Option<&str> {
        match self {
            Error::Protocol(e) => e.message.as_deref(),
            _ => None,
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out: {message}")]
    Timeout { message: String },

    /// The response body could not be decoded.
    #[error("invalid response body: {message}")]
    Decode { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout {
                message: err.to_string(),
            }
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else if err.is_decode() {
            TransportError::Decode {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(TransportError::from(err))
    }
}

/// Non-success response from the identity service.
#[derive(Debug)]
pub struct ProtocolError {
    /// HTTP status code.
    pub status: u16,
    /// Error message from the service (the `msg` field of the body).
    pub message: Option<String>,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProtocolError {}

impl ProtocolError {
    /// Create a new protocol error.
    pub fn new(status: u16, message: Option<String>) -> Self {
        Self { status, message }
    }

    /// Check if this is an authentication-rejected response.
    pub fn is_auth_error(&self) -> bool {
        self.status == 401
    }
}

/// Persistence backend errors.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Underlying I/O failure.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The backing file exists but is not a JSON object of strings.
    #[error("corrupt store at {path}: {reason}")]
    Corrupt { path: String, reason: String },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid identity service URL.
    #[error("invalid service URL '{value}': {reason}")]
    ServiceUrl { value: String, reason: String },

    /// Token contains characters that cannot appear in an HTTP header.
    #[error("token is not a valid header value")]
    Token,

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}

/// A failed login, carrying the message to show the user.
///
/// The message is the one supplied by the identity service when present,
/// otherwise [`GENERIC_LOGIN_FAILURE`].
#[derive(Debug, Error)]
#[error("{message}")]
pub struct LoginError {
    message: String,
    #[source]
    source: Error,
}

impl LoginError {
    pub(crate) fn from_error(source: Error) -> Self {
        let message = source
            .service_message()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(GENERIC_LOGIN_FAILURE)
            .to_string();
        Self { message, source }
    }

    /// Returns the user-facing message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the underlying error.
    pub fn cause(&self) -> &Error {
        &self.source
    }

    /// Returns true if the service explicitly rejected the credentials.
    ///
    /// Only client errors (4xx) count; a 5xx means the service failed.
    pub fn is_rejected(&self) -> bool {
        matches!(&self.source, Error::Protocol(e) if (400..500).contains(&e.status))
    }
}
