//! In-memory session record.

use super::profile::UserProfile;
use super::tokens::Token;

/// The current token and user profile.
///
/// An empty session has no token and no user. A user is only ever present
/// alongside a token; a token may be present without a user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    token: Option<Token>,
    user: Option<UserProfile>,
}

impl Session {
    /// Returns the token, if one is held.
    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    /// Returns the user profile, if one is held.
    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    /// Returns true if a non-empty token is held.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Replace both fields. Empty tokens are stored as no token, and a user
    /// without a token is dropped.
    pub(crate) fn replace(&mut self, token: Option<Token>, user: Option<UserProfile>) {
        self.token = token.filter(|t| !t.is_empty());
        self.user = if self.token.is_some() { user } else { None };
    }

    /// Replace the user. Ignored when no token is held.
    pub(crate) fn set_user(&mut self, user: UserProfile) {
        if self.token.is_some() {
            self.user = Some(user);
        }
    }

    pub(crate) fn clear(&mut self) {
        self.token = None;
        self.user = None;
    }
}
