//! Session storage for persisting login state.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;

use sessionkeep::{FilePersistence, HttpIdentityService, NoPersistence, ServiceUrl, SessionStore};

use super::{CliIdentity, CliPersistence};
use crate::cli::StoreArgs;

/// Session store used by every command.
pub type CliStore = SessionStore<CliIdentity, CliPersistence>;

/// Get the default session file path.
fn default_session_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "sessionkeep").context("Could not determine data directory")?;

    let data_dir = dirs.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data directory")?;

    Ok(data_dir.join("session.json"))
}

/// Build the identity service client from the command line.
pub fn identity_service(args: &StoreArgs) -> Result<HttpIdentityService> {
    let url = ServiceUrl::new(&args.service).context("Invalid service URL")?;

    let mut builder = HttpIdentityService::builder(url);
    if let Some(secs) = args.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    builder.build().context("Failed to create HTTP client")
}

fn persistence(args: &StoreArgs) -> Result<CliPersistence> {
    if args.ephemeral {
        return Ok(CliPersistence::Ephemeral(NoPersistence));
    }

    let path = match &args.session_file {
        Some(path) => path.clone(),
        None => default_session_path()?,
    };
    tracing::debug!(path = %path.display(), "Using session file");
    Ok(CliPersistence::File(FilePersistence::new(path)))
}

fn open_with(args: &StoreArgs, identity: CliIdentity) -> Result<CliStore> {
    let mut store = SessionStore::new(identity, persistence(args)?);
    store.initialize();
    Ok(store)
}

/// Open the session store and load the persisted session.
///
/// Fails if the identity service cannot be configured.
pub fn open_store(args: &StoreArgs) -> Result<CliStore> {
    open_with(args, CliIdentity::Http(identity_service(args)?))
}

/// Open the session store for commands that can work on the local copy alone.
///
/// An unusable service configuration is logged and the store is opened
/// offline, so its remote calls fail and local state is still managed.
pub fn open_local_store(args: &StoreArgs) -> Result<CliStore> {
    let identity = match identity_service(args) {
        Ok(service) => CliIdentity::Http(service),
        Err(e) => {
            let reason = format!("{:#}", e);
            tracing::warn!(service = %args.service, %reason, "Identity service unavailable");
            CliIdentity::Offline {
                service: args.service.clone(),
                reason,
            }
        }
    };
    open_with(args, identity)
}
