//! Navigation guard.
//!
//! Decides whether a navigation to a protected view may proceed or should be
//! sent to the login view instead.

use crate::identity::IdentityService;
use crate::persistence::Persistence;
use crate::store::SessionStore;

/// Default route of the login view.
pub const LOGIN_ROUTE: &str = "/login";

/// Decision for a guarded navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// The user is authenticated; continue.
    Proceed,
    /// The user is not authenticated; go to this route.
    Redirect(String),
}

impl Navigation {
    /// Returns true if navigation may continue.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Navigation::Proceed)
    }
}

/// Allow navigation only when the store holds a session.
pub fn require_authenticated<I, P>(store: &SessionStore<I, P>, login_route: &str) -> Navigation
where
    I: IdentityService,
    P: Persistence,
{
    if store.is_authenticated() {
        Navigation::Proceed
    } else {
        Navigation::Redirect(login_route.to_string())
    }
}

/// Re-read the persisted session, then apply [`require_authenticated`].
///
/// Use this at the entry of every protected view so that a session written
/// or cleared by another part of the process is picked up.
pub fn initialize_and_check<I, P>(store: &mut SessionStore<I, P>, login_route: &str) -> Navigation
where
    I: IdentityService,
    P: Persistence,
{
    store.initialize();
    require_authenticated(store, login_route)
}
