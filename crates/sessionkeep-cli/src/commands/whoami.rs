//! Whoami command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;

use sessionkeep::ProfileRefresh;
use sessionkeep::guard::{LOGIN_ROUTE, Navigation, require_authenticated};

use crate::cli::StoreArgs;
use crate::output;
use crate::session::open_store;

#[derive(Args, Debug)]
pub struct WhoamiArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

const NO_SESSION: &str = "No active session. Run 'sessionkeep login' first.";

pub async fn run(args: WhoamiArgs, store_args: &StoreArgs) -> Result<()> {
    let mut store = open_store(store_args)?;

    if let Navigation::Redirect(_) = require_authenticated(&store, LOGIN_ROUTE) {
        bail!(NO_SESSION);
    }

    match store.refresh_user_profile().await {
        ProfileRefresh::Updated(user) => {
            if args.json {
                output::json_pretty(&user)?;
            } else {
                output::profile(&user);
            }
            Ok(())
        }
        ProfileRefresh::NoSession => bail!(NO_SESSION),
        ProfileRefresh::Invalidated => {
            bail!("Session is no longer valid. Run 'sessionkeep login' again.")
        }
        ProfileRefresh::Unavailable(e) => {
            if let Some(user) = store.user() {
                output::warning("Showing cached profile");
                output::profile(user);
            }
            Err(e).context("Failed to fetch current user")
        }
    }
}
