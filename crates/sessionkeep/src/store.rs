//! The session store.
//!
//! [`SessionStore`] is the single source of truth for the current session.
//! It loads the session from persistence, mirrors every change back to it,
//! and consults the identity service to log in, log out, and verify the
//! current user.

use tracing::{debug, info, instrument, warn};

use crate::auth::{Credentials, Session, Token, UserProfile};
use crate::error::{Error, InvalidInputError, LoginError};
use crate::identity::IdentityService;
use crate::persistence::{Persistence, TOKEN_KEY, USER_KEY};

/// Outcome of [`SessionStore::refresh_user_profile`].
#[derive(Debug)]
pub enum ProfileRefresh {
    /// The service returned the current profile; it is now stored.
    Updated(UserProfile),
    /// No token was held, so nothing was asked of the service.
    NoSession,
    /// The service rejected the token; the session has been cleared.
    Invalidated,
    /// The service could not be reached or failed; the session is unchanged.
    Unavailable(Error),
}

impl ProfileRefresh {
    /// Returns the refreshed profile, if any.
    pub fn profile(&self) -> Option<&UserProfile> {
        match self {
            ProfileRefresh::Updated(profile) => Some(profile),
            _ => None,
        }
    }

    /// Collapse to the refreshed profile, discarding why there is none.
    pub fn into_profile(self) -> Option<UserProfile> {
        match self {
            ProfileRefresh::Updated(profile) => Some(profile),
            _ => None,
        }
    }
}

/// Session-token cache backed by persistence and an identity service.
///
/// Mutating operations take `&mut self`; the store is meant to have a single
/// owner and does no internal locking. Consumers that only need to read
/// the session borrow it through [`SessionStore::session`].
///
/// # Example
///
/// ```no_run
/// use sessionkeep::{Credentials, HttpIdentityService, MemoryPersistence, ServiceUrl, SessionStore};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let identity = HttpIdentityService::new(ServiceUrl::new("http://localhost:5001")?)?;
/// let mut store = SessionStore::new(identity, MemoryPersistence::new());
/// store.initialize();
///
/// match store.login(&Credentials::new("alice", "secret")).await {
///     Ok(user) => println!("logged in as {}", user.username),
///     Err(e) => eprintln!("{}", e.message()),
/// }
///
/// store.logout().await;
/// assert!(!store.is_authenticated());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SessionStore<I, P> {
    identity: I,
    persistence: P,
    session: Session,
}

impl<I, P> SessionStore<I, P>
where
    I: IdentityService,
    P: Persistence,
{
    /// Create an empty store. Call [`initialize`](Self::initialize) to load
    /// a persisted session.
    pub fn new(identity: I, persistence: P) -> Self {
        Self {
            identity,
            persistence,
            session: Session::default(),
        }
    }

    /// Load the session from persistence, replacing the in-memory one.
    ///
    /// A stored user that does not parse as a profile is dropped and removed
    /// from persistence; the stored token is kept either way. Makes no
    /// network call.
    #[instrument(skip(self))]
    pub fn initialize(&mut self) {
        let token = self.read(TOKEN_KEY).map(Token::new);

        let user = self
            .read(USER_KEY)
            .and_then(|raw| match UserProfile::from_json(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!(error = %e, "Discarding unreadable stored user");
                    self.remove(USER_KEY);
                    None
                }
            });

        if user.is_some() && token.as_ref().is_none_or(Token::is_empty) {
            debug!("Ignoring stored user without a token");
        }

        self.session.replace(token, user);
        debug!(
            authenticated = self.session.is_authenticated(),
            "Session initialized"
        );
    }

    /// Authenticate with the identity service and store the new session.
    ///
    /// On failure the current session is left as it was.
    #[instrument(skip(self, credentials), fields(username = %credentials.username()))]
    pub async fn login(&mut self, credentials: &Credentials) -> Result<UserProfile, LoginError> {
        info!("Logging in");

        let response = self
            .identity
            .authenticate(credentials)
            .await
            .map_err(|e| {
                warn!(error = %e, "Login failed");
                LoginError::from_error(e)
            })?;

        if response.access_token.is_empty() {
            warn!("Identity service returned an empty token");
            return Err(LoginError::from_error(
                InvalidInputError::Other {
                    message: "identity service returned an empty token".to_string(),
                }
                .into(),
            ));
        }

        let token = Token::new(response.access_token);
        let user = UserProfile::new(response.username);

        self.write(TOKEN_KEY, token.as_str());
        self.write_user(&user);
        self.session.replace(Some(token), Some(user.clone()));

        info!(username = %user.username, "Logged in");
        Ok(user)
    }

    /// End the session.
    ///
    /// The identity service is told first, but its answer is ignored: the
    /// local session and its persisted copy are always cleared.
    #[instrument(skip(self))]
    pub async fn logout(&mut self) {
        if let Some(token) = self.session.token().cloned() {
            if let Err(e) = self.identity.invalidate(&token).await {
                warn!(error = %e, "Logout call failed, clearing local session anyway");
            }
        }

        self.session.clear();
        self.remove(TOKEN_KEY);
        self.remove(USER_KEY);

        info!("Logged out");
    }

    /// Ask the identity service who the current token belongs to.
    ///
    /// A 401 answer clears the session exactly as [`logout`](Self::logout)
    /// does. Any other failure leaves it untouched.
    #[instrument(skip(self))]
    pub async fn refresh_user_profile(&mut self) -> ProfileRefresh {
        let Some(token) = self.session.token().cloned() else {
            debug!("No session to refresh");
            return ProfileRefresh::NoSession;
        };

        match self.identity.whoami(&token).await {
            Ok(user) => {
                self.write_user(&user);
                self.session.set_user(user.clone());
                debug!(username = %user.username, "Profile refreshed");
                ProfileRefresh::Updated(user)
            }
            Err(e) if e.is_auth_error() => {
                warn!(error = %e, "Token rejected, ending session");
                self.logout().await;
                ProfileRefresh::Invalidated
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch current user");
                ProfileRefresh::Unavailable(e)
            }
        }
    }

    /// Returns true if a token is held.
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Read-only view of the session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the current token, if any.
    pub fn token(&self) -> Option<&Token> {
        self.session.token()
    }

    /// Returns the current user profile, if any.
    pub fn user(&self) -> Option<&UserProfile> {
        self.session.user()
    }

    /// Returns the identity service.
    pub fn identity(&self) -> &I {
        &self.identity
    }

    /// Returns the persistence backend.
    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.persistence.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "Failed to read persisted value, treating as absent");
                None
            }
        }
    }

    fn write(&mut self, key: &str, value: &str) {
        if let Err(e) = self.persistence.set(key, value) {
            warn!(key, error = %e, "Failed to persist value");
        }
    }

    fn write_user(&mut self, user: &UserProfile) {
        match user.to_json() {
            Ok(json) => self.write(USER_KEY, &json),
            Err(e) => warn!(error = %e, "Failed to serialize user"),
        }
    }

    fn remove(&mut self, key: &str) {
        if let Err(e) = self.persistence.delete(key) {
            warn!(key, error = %e, "Failed to remove persisted value");
        }
    }
}
