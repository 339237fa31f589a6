//! Subcommand implementations.

mod login;
mod logout;
mod register;
mod status;
mod whoami;

use anyhow::Result;
use clap::Subcommand;

use crate::cli::StoreArgs;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and store the session
    Login(login::LoginArgs),

    /// End the session (always clears the local copy)
    Logout(logout::LogoutArgs),

    /// Verify the session with the identity service and show the user
    Whoami(whoami::WhoamiArgs),

    /// Show the stored session without contacting the service
    Status(status::StatusArgs),

    /// Create a new account
    Register(register::RegisterArgs),
}

pub async fn handle(cmd: Command, store: &StoreArgs) -> Result<()> {
    match cmd {
        Command::Login(args) => login::run(args, store).await,
        Command::Logout(args) => logout::run(args, store).await,
        Command::Whoami(args) => whoami::run(args, store).await,
        Command::Status(args) => status::run(args, store),
        Command::Register(args) => register::run(args, store).await,
    }
}
