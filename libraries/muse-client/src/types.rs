//! Types for Muse API requests and responses.

use serde::{Deserialize, Serialize};

/// Configuration for connecting to the Muse API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API (e.g., "http://localhost:8000")
    pub url: String,
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
}

impl ClientConfig {
    /// Create a config with default timeouts.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }

    /// Override both timeouts.
    pub fn with_timeouts(mut self, timeout_secs: u64, connect_timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self.connect_timeout_secs = connect_timeout_secs;
        self
    }
}

// =============================================================================
// Authentication Types
// =============================================================================

/// Request body for the login endpoint.
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response from a successful login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Request body for the registration endpoint.
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub lastname: String,
    pub email: String,
    pub password: String,
}

/// Account returned by registration, when the server echoes one.
#[derive(Debug, Clone, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    pub email: String,
}

// =============================================================================
// Error Types
// =============================================================================

/// Error body sent with non-2xx responses.
///
/// Servers differ on the field name; the first non-empty one wins.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiError {
    /// Extract the human-readable message from a raw error body.
    pub fn message_from(body: &[u8]) -> Option<String> {
        let parsed: ApiError = serde_json::from_slice(body).ok()?;
        let detail = parsed.detail.and_then(|d| match d {
            serde_json::Value::String(s) => Some(s),
            _ => None,
        });
        [parsed.message, detail, parsed.error]
            .into_iter()
            .flatten()
            .map(|m| m.trim().to_string())
            .find(|m| !m.is_empty())
    }
}
