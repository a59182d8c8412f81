//! Error types for the admin controllers.

use muse_client::ClientError;
use muse_core::ValidationError;
use thiserror::Error;

/// Why a controller operation did not complete.
///
/// `Display` is the message the screen shows.
#[derive(Error, Debug)]
pub enum AdminError {
    /// The session check failed before the operation started
    #[error("Token inválido o expirado")]
    SessionExpired,

    /// The draft was rejected locally
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The remote call failed
    #[error(transparent)]
    Client(#[from] ClientError),
}

impl AdminError {
    /// True when the remote service refused because of dependent records.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Client(e) if e.is_conflict())
    }
}

/// Result type for controller operations.
pub type Result<T> = std::result::Result<T, AdminError>;
