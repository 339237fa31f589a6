//! Session store wiring for the CLI.

pub mod storage;
mod types;

pub use storage::{open_local_store, open_store};
pub use types::{CliIdentity, CliPersistence};
