//! Error types for the Muse client.

use muse_core::ValidationError;
use thiserror::Error;

/// Errors that can occur when talking to the Muse API.
///
/// For server responses the `Display` text is the message to show the user:
/// the server's own message when it sent one, otherwise a generic message
/// naming the entity type.
#[derive(Error, Debug)]
pub enum ClientError {
    /// No response arrived (connection refused, timeout, DNS)
    #[error("No se pudo conectar con el servidor")]
    Network { detail: String },

    /// Server returned a non-2xx response
    #[error("{message}")]
    Remote { status: u16, message: String },

    /// Server rejected the credential (401)
    #[error("{message}")]
    Unauthorized { message: String },

    /// Server refused because other records depend on this one (409)
    #[error("{message}")]
    Conflict { message: String },

    /// Input rejected locally before any request was made
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Invalid server URL
    #[error("URL del servidor inválida: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Respuesta inválida del servidor: {0}")]
    ParseError(String),

    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Request(#[from] reqwest::Error),

    /// IO error while reading or writing the stored credential
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// HTTP status of a server response, if this error came from one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            Self::Unauthorized { .. } => Some(401),
            Self::Conflict { .. } => Some(409),
            _ => None,
        }
    }

    /// True for a refusal caused by dependent records.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    pub(crate) fn network(err: &reqwest::Error) -> Self {
        Self::Network {
            detail: err.to_string(),
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
