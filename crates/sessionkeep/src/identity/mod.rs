//! Remote identity service.
//!
//! [`IdentityService`] is the seam between the session store and whatever
//! issues and verifies tokens. [`HttpIdentityService`] speaks the JSON-over-HTTP
//! protocol served under `{base}/api/`.

mod client;
mod endpoints;
mod http;

use async_trait::async_trait;

use crate::Result;
use crate::auth::{Credentials, Token, UserProfile};

pub use client::{DEFAULT_USER_AGENT, HttpClient};
pub use endpoints::LoginResponse;
pub use http::{HttpIdentityService, HttpIdentityServiceBuilder};

/// Operations the session store consumes from an identity service.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Exchange credentials for a token and the canonical username.
    async fn authenticate(&self, credentials: &Credentials) -> Result<LoginResponse>;

    /// Tell the service the session identified by `token` is ending.
    async fn invalidate(&self, token: &Token) -> Result<()>;

    /// Fetch the profile of the account owning `token`.
    ///
    /// A rejected token surfaces as a protocol error with status 401.
    async fn whoami(&self, token: &Token) -> Result<UserProfile>;

    /// Create a new account, returning the service's confirmation message.
    async fn register(&self, credentials: &Credentials) -> Result<Option<String>>;
}

#[async_trait]
impl<T: IdentityService + ?Sized> IdentityService for std::sync::Arc<T> {
    async fn authenticate(&self, credentials: &Credentials) -> Result<LoginResponse> {
        (**self).authenticate(credentials).await
    }

    async fn invalidate(&self, token: &Token) -> Result<()> {
        (**self).invalidate(token).await
    }

    async fn whoami(&self, token: &Token) -> Result<UserProfile> {
        (**self).whoami(token).await
    }

    async fn register(&self, credentials: &Credentials) -> Result<Option<String>> {
        (**self).register(credentials).await
    }
}
