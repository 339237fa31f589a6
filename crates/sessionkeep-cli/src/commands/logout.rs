//! Logout command implementation.

use anyhow::Result;
use clap::Args;

use crate::cli::StoreArgs;
use crate::output;
use crate::session::open_local_store;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(_args: LogoutArgs, store_args: &StoreArgs) -> Result<()> {
    let mut store = open_local_store(store_args)?;

    let was_authenticated = store.is_authenticated();
    if was_authenticated && store.identity().is_offline() {
        output::warning("Service URL is invalid; clearing the local session only");
    }
    store.logout().await;

    if was_authenticated {
        output::success("Logged out");
    } else {
        output::success("No active session");
    }

    Ok(())
}
