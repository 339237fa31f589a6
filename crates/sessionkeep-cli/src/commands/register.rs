//! Register command implementation.

use anyhow::Result;
use clap::Args;

use sessionkeep::{Credentials, IdentityService};

use crate::cli::StoreArgs;
use crate::output;
use crate::session::storage::identity_service;

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Username for the new account
    #[arg(long)]
    pub username: String,

    /// Password for the new account
    #[arg(long)]
    pub password: String,
}

pub async fn run(args: RegisterArgs, store_args: &StoreArgs) -> Result<()> {
    let identity = identity_service(store_args)?;
    let credentials = Credentials::new(&args.username, &args.password);

    let message = identity.register(&credentials).await.map_err(|e| {
        let reason = e.service_message().unwrap_or("Registration failed").to_string();
        anyhow::Error::new(e).context(reason)
    })?;

    output::success(message.as_deref().unwrap_or("Account created"));
    output::field("Username", &args.username);

    Ok(())
}
