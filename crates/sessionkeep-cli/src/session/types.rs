//! CLI identity and persistence wrappers.

use std::path::Path;

use async_trait::async_trait;
use sessionkeep::error::{InvalidInputError, PersistenceError};
use sessionkeep::identity::LoginResponse;
use sessionkeep::{
    Credentials, Error, FilePersistence, HttpIdentityService, IdentityService, NoPersistence,
    Persistence, Token, UserProfile,
};

/// Identity service selected on the command line.
#[derive(Debug)]
pub enum CliIdentity {
    Http(HttpIdentityService),
    /// The configured service URL is unusable; every remote call fails.
    Offline { service: String, reason: String },
}

impl CliIdentity {
    /// Returns true if remote calls cannot be made.
    pub fn is_offline(&self) -> bool {
        matches!(self, CliIdentity::Offline { .. })
    }

    fn offline_error(service: &str, reason: &str) -> Error {
        InvalidInputError::ServiceUrl {
            value: service.to_string(),
            reason: reason.to_string(),
        }
        .into()
    }
}

#[async_trait]
impl IdentityService for CliIdentity {
    async fn authenticate(&self, credentials: &Credentials) -> sessionkeep::Result<LoginResponse> {
        match self {
            CliIdentity::Http(service) => service.authenticate(credentials).await,
            CliIdentity::Offline { service, reason } => Err(Self::offline_error(service, reason)),
        }
    }

    async fn invalidate(&self, token: &Token) -> sessionkeep::Result<()> {
        match self {
            CliIdentity::Http(service) => service.invalidate(token).await,
            CliIdentity::Offline { service, reason } => Err(Self::offline_error(service, reason)),
        }
    }

    async fn whoami(&self, token: &Token) -> sessionkeep::Result<UserProfile> {
        match self {
            CliIdentity::Http(service) => service.whoami(token).await,
            CliIdentity::Offline { service, reason } => Err(Self::offline_error(service, reason)),
        }
    }

    async fn register(&self, credentials: &Credentials) -> sessionkeep::Result<Option<String>> {
        match self {
            CliIdentity::Http(service) => service.register(credentials).await,
            CliIdentity::Offline { service, reason } => Err(Self::offline_error(service, reason)),
        }
    }
}

/// Persistence backend selected on the command line.
#[derive(Debug)]
pub enum CliPersistence {
    File(FilePersistence),
    Ephemeral(NoPersistence),
}

impl CliPersistence {
    /// Returns the session file, if the session is persisted.
    pub fn path(&self) -> Option<&Path> {
        match self {
            CliPersistence::File(store) => Some(store.path()),
            CliPersistence::Ephemeral(_) => None,
        }
    }
}

impl Persistence for CliPersistence {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        match self {
            CliPersistence::File(store) => store.get(key),
            CliPersistence::Ephemeral(store) => store.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        match self {
            CliPersistence::File(store) => store.set(key, value),
            CliPersistence::Ephemeral(store) => store.set(key, value),
        }
    }

    fn delete(&mut self, key: &str) -> Result<(), PersistenceError> {
        match self {
            CliPersistence::File(store) => store.delete(key),
            CliPersistence::Ephemeral(store) => store.delete(key),
        }
    }
}
