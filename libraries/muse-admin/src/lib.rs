//! Muse Admin
//!
//! Screen controllers for the Muse administration console, independent of
//! how the screens are drawn.
//!
//! # Architecture
//!
//! - **Session Guard**: checks the session on mount and every 60 seconds
//!   while a protected view is open
//! - **List Controller**: loads a collection, refreshes it after every
//!   mutation and asks before deactivating
//! - **Form Controller**: edits a draft, validates it and creates or updates
//!   the record
//!
//! Every controller receives the session authority and the resource client
//! it talks to; nothing is looked up globally.
//!
//! # Example
//!
//! ```ignore
//! use muse_admin::{ListController, SessionGuard, GuardStatus};
//! use muse_core::ArtTypeEdit;
//! use std::sync::Arc;
//!
//! let guard = SessionGuard::mount(session.clone());
//! if guard.checked().await != GuardStatus::Valid {
//!     return Ok(());
//! }
//!
//! let list = ListController::new(Arc::new(client.art_types()), session.clone());
//! list.load().await;
//!
//! let form = list.form(None);
//! form.edit(ArtTypeEdit::Name("Escultura".into()));
//! form.edit(ArtTypeEdit::Description("Obras en volumen".into()));
//! list.submit_form(&form).await?;
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod form;
pub mod guard;
pub mod list;
pub mod transient;

pub use error::{AdminError, Result};
pub use form::{FormController, Key, KeyOutcome, Saved};
pub use guard::{GuardStatus, SessionGuard, DEFAULT_POLL_INTERVAL};
pub use list::{
    Confirm, DeactivateOutcome, ListController, ListView, Phase, Row, HIGHLIGHT_DURATION,
    SUCCESS_DURATION,
};
pub use transient::TransientSlot;
