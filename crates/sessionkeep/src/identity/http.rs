//! HTTP-backed identity service.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::Result;
use crate::auth::{Credentials, Token, UserProfile};
use crate::types::ServiceUrl;

use super::IdentityService;
use super::client::{DEFAULT_USER_AGENT, HttpClient};
use super::endpoints::{EmptyBody, LOGIN, LOGOUT, LoginResponse, ME, MessageResponse, REGISTER};

/// Identity service reached over HTTP.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use sessionkeep::{HttpIdentityService, ServiceUrl};
///
/// # fn example() -> Result<(), sessionkeep::Error> {
/// let service = ServiceUrl::new("http://localhost:5001")?;
/// let identity = HttpIdentityService::builder(service)
///     .timeout(Duration::from_secs(10))
///     .build()?;
/// assert_eq!(identity.url().as_str(), "http://localhost:5001/");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpIdentityService {
    client: HttpClient,
}

impl HttpIdentityService {
    /// Create a service client with default settings.
    pub fn new(service: ServiceUrl) -> Result<Self> {
        Self::builder(service).build()
    }

    /// Start configuring a service client.
    pub fn builder(service: ServiceUrl) -> HttpIdentityServiceBuilder {
        HttpIdentityServiceBuilder {
            service,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
        }
    }

    /// Returns the service URL.
    pub fn url(&self) -> &ServiceUrl {
        self.client.service()
    }
}

/// Builder for [`HttpIdentityService`].
#[derive(Debug, Clone)]
pub struct HttpIdentityServiceBuilder {
    service: ServiceUrl,
    user_agent: String,
    timeout: Option<Duration>,
}

impl HttpIdentityServiceBuilder {
    /// Override the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Abort requests that take longer than `timeout`.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the service client.
    pub fn build(self) -> Result<HttpIdentityService> {
        let client = HttpClient::build(self.service, &self.user_agent, self.timeout)?;
        Ok(HttpIdentityService { client })
    }
}

#[async_trait]
impl IdentityService for HttpIdentityService {
    #[instrument(skip(self, credentials), fields(username = %credentials.username()))]
    async fn authenticate(&self, credentials: &Credentials) -> Result<LoginResponse> {
        debug!("Authenticating");
        self.client.post(LOGIN, credentials).await
    }

    #[instrument(skip(self, token))]
    async fn invalidate(&self, token: &Token) -> Result<()> {
        debug!("Invalidating session");
        self.client
            .post_authed_no_response(LOGOUT, &EmptyBody {}, token)
            .await
    }

    #[instrument(skip(self, token))]
    async fn whoami(&self, token: &Token) -> Result<UserProfile> {
        debug!("Fetching current user");
        self.client.get_authed(ME, token).await
    }

    #[instrument(skip(self, credentials), fields(username = %credentials.username()))]
    async fn register(&self, credentials: &Credentials) -> Result<Option<String>> {
        debug!("Registering account");
        let response: MessageResponse = self.client.post(REGISTER, credentials).await?;
        Ok(response.msg)
    }
}
