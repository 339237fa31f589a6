//! Login command implementation.

use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;

use sessionkeep::Credentials;

use crate::cli::StoreArgs;
use crate::output;
use crate::session::{CliIdentity, open_store};

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account username
    #[arg(long)]
    pub username: String,

    /// Account password
    #[arg(long)]
    pub password: String,
}

pub async fn run(args: LoginArgs, store_args: &StoreArgs) -> Result<()> {
    let mut store = open_store(store_args)?;
    let credentials = Credentials::new(&args.username, &args.password);

    eprintln!("{}", "Logging in...".dimmed());

    let user = match store.login(&credentials).await {
        Ok(user) => user,
        Err(e) => bail!("{}", e.message()),
    };

    output::success("Logged in successfully");
    println!();
    output::field("Username", &user.username);
    match store.identity() {
        CliIdentity::Http(service) => output::field("Service", service.url().as_str()),
        CliIdentity::Offline { service, .. } => output::field("Service", service),
    }

    Ok(())
}
