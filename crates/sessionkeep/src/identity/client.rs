//! HTTP client for the identity service.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, trace};

use crate::auth::Token;
use crate::error::{Error, InvalidInputError, ProtocolError, TransportError};
use crate::types::ServiceUrl;

use super::endpoints::ErrorResponse;

/// Default User-Agent header value.
pub const DEFAULT_USER_AGENT: &str = concat!("sessionkeep/", env!("CARGO_PKG_VERSION"));

/// HTTP client bound to one identity service.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    service: ServiceUrl,
}

impl HttpClient {
    /// Create a client with default settings and no request timeout.
    pub fn new(service: ServiceUrl) -> Result<Self, Error> {
        Self::build(service, DEFAULT_USER_AGENT, None)
    }

    /// Create a client with an explicit User-Agent and optional timeout.
    pub fn build(
        service: ServiceUrl,
        user_agent: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, Error> {
        let mut builder = reqwest::Client::builder().user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| TransportError::Http {
            message: format!("failed to build HTTP client: {}", e),
        })?;

        Ok(Self { client, service })
    }

    /// Returns the service URL this client is configured for.
    pub fn service(&self) -> &ServiceUrl {
        &self.service
    }

    /// POST a JSON body without authentication.
    #[instrument(skip(self, body), fields(service = %self.service))]
    pub async fn post<B, R>(&self, endpoint: &str, body: &B) -> Result<R, Error>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let url = self.service.api_url(endpoint);
        debug!(endpoint, %url, "POST");

        let response = self.client.post(&url).json(body).send().await?;

        self.handle_response(response).await
    }

    /// POST a JSON body with a bearer token, ignoring any response body.
    #[instrument(skip(self, body, token), fields(service = %self.service))]
    pub async fn post_authed_no_response<B>(
        &self,
        endpoint: &str,
        body: &B,
        token: &Token,
    ) -> Result<(), Error>
    where
        B: Serialize,
    {
        let url = self.service.api_url(endpoint);
        debug!(endpoint, "authenticated POST (no response)");

        let response = self
            .client
            .post(&url)
            .json(body)
            .headers(auth_headers(token)?)
            .send()
            .await?;

        let status = response.status();
        trace!(status = %status, "response");
        if status.is_success() {
            Ok(())
        } else {
            Err(Error::Protocol(parse_error_response(response).await))
        }
    }

    /// GET with a bearer token.
    #[instrument(skip(self, token), fields(service = %self.service))]
    pub async fn get_authed<R>(&self, endpoint: &str, token: &Token) -> Result<R, Error>
    where
        R: DeserializeOwned,
    {
        let url = self.service.api_url(endpoint);
        debug!(endpoint, "authenticated GET");

        let response = self
            .client
            .get(&url)
            .headers(auth_headers(token)?)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Handle a response, parsing the body or error.
    async fn handle_response<R: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<R, Error> {
        let status = response.status();
        trace!(status = %status, "response");

        if status.is_success() {
            let body = response.json::<R>().await?;
            Ok(body)
        } else {
            Err(Error::Protocol(parse_error_response(response).await))
        }
    }
}

/// Create the Authorization header for a bearer token.
fn auth_headers(token: &Token) -> Result<HeaderMap, Error> {
    let mut value = HeaderValue::from_str(&format!("Bearer {}", token.as_str()))
        .map_err(|_| InvalidInputError::Token)?;
    value.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, value);
    Ok(headers)
}

/// Parse an error response body.
async fn parse_error_response(response: reqwest::Response) -> ProtocolError {
    let status = response.status().as_u16();

    match response.json::<ErrorResponse>().await {
        Ok(body) => ProtocolError::new(status, body.msg),
        Err(_) => ProtocolError::new(status, None),
    }
}
