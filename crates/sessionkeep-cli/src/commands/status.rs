//! Status command implementation.

use anyhow::Result;
use clap::Args;
use serde_json::json;

use crate::cli::StoreArgs;
use crate::output;
use crate::session::open_local_store;

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: StatusArgs, store_args: &StoreArgs) -> Result<()> {
    let store = open_local_store(store_args)?;
    let session_file = store
        .persistence()
        .path()
        .map(|p| p.display().to_string());

    if args.json {
        return output::json_pretty(&json!({
            "authenticated": store.is_authenticated(),
            "user": store.user(),
            "session_file": session_file,
        }));
    }

    if store.is_authenticated() {
        output::field("Status", "authenticated");
        if let Some(user) = store.user() {
            output::profile(user);
        }
    } else {
        output::field("Status", "not authenticated");
    }
    if let Some(path) = session_file {
        output::field("Session file", &path);
    }

    Ok(())
}
