//! Authentication types.
//!
//! This module provides the credential, token, and profile primitives that
//! make up a [`Session`].

mod credentials;
mod profile;
mod session;
mod tokens;

pub use credentials::Credentials;
pub use profile::UserProfile;
pub use session::Session;
pub use tokens::Token;
