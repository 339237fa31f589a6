//! Identity service URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// Path prefix under which the identity service exposes its endpoints.
const API_PREFIX: &str = "api";

/// A validated base URL of an identity service.
///
/// Must use HTTPS, or HTTP when the host is a loopback address.
///
/// # Example
///
/// ```
/// use sessionkeep::ServiceUrl;
///
/// let service = ServiceUrl::new("https://auth.example.com/").unwrap();
/// assert_eq!(service.api_url("login"), "https://auth.example.com/api/login");
///
/// let local = ServiceUrl::new("http://localhost:5001").unwrap();
/// assert_eq!(local.api_url("me"), "http://localhost:5001/api/me");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ServiceUrl(Url);

impl ServiceUrl {
    /// Create a new service URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not valid or doesn't meet requirements.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::ServiceUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        Ok(Self(url))
    }

    /// Returns the full URL of an endpoint under the API prefix.
    pub fn api_url(&self, endpoint: &str) -> String {
        // Url keeps a trailing slash on root paths
        let base = self.0.as_str().trim_end_matches('/');
        format!("{}/{}/{}", base, API_PREFIX, endpoint)
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        let invalid = |reason: &str| {
            Error::from(InvalidInputError::ServiceUrl {
                value: original.to_string(),
                reason: reason.to_string(),
            })
        };

        if url.cannot_be_a_base() {
            return Err(invalid("must be an absolute URL"));
        }

        let Some(host) = url.host_str() else {
            return Err(invalid("must have a host"));
        };

        let is_localhost = matches!(host, "localhost" | "127.0.0.1" | "[::1]" | "::1");
        let scheme = url.scheme();

        if scheme != "https" && !(scheme == "http" && is_localhost) {
            return Err(invalid("must use HTTPS (HTTP allowed only for localhost)"));
        }

        if url.query().is_some() || url.fragment().is_some() {
            return Err(invalid("must not carry a query or fragment"));
        }

        Ok(())
    }
}

impl fmt::Display for ServiceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ServiceUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for ServiceUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for ServiceUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ServiceUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for ServiceUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_https_url() {
        let service = ServiceUrl::new("https://auth.example.com").unwrap();
        assert_eq!(service.host(), Some("auth.example.com"));
    }

    #[test]
    fn valid_localhost_http() {
        let service = ServiceUrl::new("http://localhost:5001").unwrap();
        assert_eq!(service.host(), Some("localhost"));
        let service = ServiceUrl::new("http://127.0.0.1:8080").unwrap();
        assert_eq!(service.api_url("login"), "http://127.0.0.1:8080/api/login");
    }

    #[test]
    fn api_url_ignores_trailing_slash() {
        let service = ServiceUrl::new("https://auth.example.com/").unwrap();
        assert_eq!(service.api_url("me"), "https://auth.example.com/api/me");
    }

    #[test]
    fn api_url_keeps_base_path() {
        let service = ServiceUrl::new("https://example.com/notes/").unwrap();
        assert_eq!(
            service.api_url("logout"),
            "https://example.com/notes/api/logout"
        );
    }

    #[test]
    fn invalid_http_non_localhost() {
        assert!(ServiceUrl::new("http://auth.example.com").is_err());
    }

    #[test]
    fn invalid_relative_url() {
        assert!(ServiceUrl::new("/api/login").is_err());
    }

    #[test]
    fn invalid_non_http_scheme() {
        assert!(ServiceUrl::new("file:///tmp/service").is_err());
        assert!(ServiceUrl::new("mailto:someone@example.com").is_err());
    }

    #[test]
    fn invalid_query() {
        assert!(ServiceUrl::new("https://auth.example.com/?x=1").is_err());
    }

    #[test]
    fn deserializes_with_validation() {
        let ok: ServiceUrl = serde_json::from_str("\"https://auth.example.com\"").unwrap();
        assert_eq!(ok.host(), Some("auth.example.com"));
        assert!(serde_json::from_str::<ServiceUrl>("\"http://auth.example.com\"").is_err());
    }
}
