//! Muse Client
//!
//! HTTP client library for the Muse catalog API.
//!
//! # Features
//!
//! - **Session**: one bearer credential with optional file persistence and a
//!   local expiry check
//! - **Authentication**: login, registration and logout
//! - **Resources**: list, fetch, create, update and deactivate for art types
//!   and arts through one generic [`ResourceClient`]
//!
//! # Example
//!
//! ```ignore
//! use muse_client::{ClientConfig, CredentialFile, MuseClient, ResourceApi, Session};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = Arc::new(Session::with_store(CredentialFile::new(".muse/credential")));
//!     session.restore().await?;
//!
//!     let client = MuseClient::new(ClientConfig::new("http://localhost:8000"), session)?;
//!     for art in client.arts().list_all().await? {
//!         println!("{}", art.title);
//!     }
//!     Ok(())
//! }
//! ```

mod auth;
mod client;
mod error;
mod resource;
mod session;
mod store;
mod types;

// Re-export main types
pub use client::MuseClient;
pub use error::{ClientError, Result};
pub use session::{Session, SessionAuthority};
pub use store::CredentialFile;
pub use types::{ApiError, ClientConfig, LoginResponse, UserInfo};

pub use auth::AuthClient;
pub use resource::{ResourceApi, ResourceClient};
