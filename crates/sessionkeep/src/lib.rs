//! sessionkeep - session-token cache with backend-verified identity.
//!
//! A [`SessionStore`] holds the current bearer token and user profile,
//! mirrors them to a [`Persistence`] backend, and consults an
//! [`IdentityService`] to log in, log out, and verify who the token belongs
//! to. A token the service rejects is dropped transparently.
//!
//! # Example
//!
//! ```no_run
//! use sessionkeep::{
//!     Credentials, FilePersistence, HttpIdentityService, ProfileRefresh, ServiceUrl, SessionStore,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let identity = HttpIdentityService::new(ServiceUrl::new("http://localhost:5001")?)?;
//! let mut store = SessionStore::new(identity, FilePersistence::new("session.json"));
//! store.initialize();
//!
//! if !store.is_authenticated() {
//!     store.login(&Credentials::new("alice", "secret")).await?;
//! }
//!
//! match store.refresh_user_profile().await {
//!     ProfileRefresh::Updated(user) => println!("hello {}", user.username),
//!     ProfileRefresh::Invalidated => println!("session expired"),
//!     other => println!("{:?}", other),
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod error;
pub mod guard;
pub mod identity;
pub mod persistence;
pub mod store;
pub mod types;

// Re-export primary types at crate root for convenience
pub use auth::{Credentials, Session, Token, UserProfile};
pub use error::{Error, LoginError};
pub use guard::Navigation;
pub use identity::{HttpIdentityService, IdentityService};
pub use persistence::{FilePersistence, MemoryPersistence, NoPersistence, Persistence};
pub use store::{ProfileRefresh, SessionStore};
pub use types::ServiceUrl;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
