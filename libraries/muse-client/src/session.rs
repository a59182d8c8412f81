//! Session context holding the bearer credential.
//!
//! The [`Session`] is created once by the application and handed to every
//! client and controller that needs it. Nothing reads the credential from
//! ambient storage.

use crate::error::Result;
use crate::store::CredentialFile;
use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Answers whether the current credential still grants access.
#[async_trait]
pub trait SessionAuthority: Send + Sync {
    async fn is_session_valid(&self) -> bool;
}

#[derive(Debug, Deserialize)]
struct Claims {
    #[serde(default)]
    exp: Option<i64>,
}

/// The single bearer credential of this client, with optional persistence.
#[derive(Debug, Default)]
pub struct Session {
    credential: RwLock<Option<String>>,
    store: Option<CredentialFile>,
}

impl Session {
    /// An in-memory session with no credential.
    pub fn new() -> Self {
        Self::default()
    }

    /// A session persisted to `store`. Call [`Session::restore`] to load it.
    pub fn with_store(store: CredentialFile) -> Self {
        Self {
            credential: RwLock::new(None),
            store: Some(store),
        }
    }

    /// An in-memory session already holding `token`.
    pub fn with_credential(token: impl Into<String>) -> Self {
        Self {
            credential: RwLock::new(Some(token.into())),
            store: None,
        }
    }

    /// Load the persisted credential, if any. Returns whether one was found.
    pub async fn restore(&self) -> Result<bool> {
        let Some(store) = &self.store else {
            return Ok(false);
        };
        let token = store.load().await?;
        let found = token.is_some();
        *self.credential.write().await = token;
        debug!(found, "Session restored");
        Ok(found)
    }

    /// Replace the credential and persist it.
    pub async fn set_credential(&self, token: impl Into<String>) -> Result<()> {
        let token = token.into();
        if let Some(store) = &self.store {
            store.save(&token).await?;
        }
        *self.credential.write().await = Some(token);
        Ok(())
    }

    /// The credential to send as a bearer token, if one is held.
    pub async fn bearer(&self) -> Option<String> {
        self.credential.read().await.clone()
    }

    /// Drop the credential from memory and storage.
    ///
    /// The in-memory credential is cleared even when removing the file fails.
    pub async fn invalidate(&self) -> Result<()> {
        let had = self.credential.write().await.take().is_some();
        if had {
            info!("Session invalidated");
        }
        match &self.store {
            Some(store) => store.clear().await,
            None => Ok(()),
        }
    }

    /// Check the held credential, invalidating it when the check fails.
    pub async fn is_valid(&self) -> bool {
        let token = self.credential.read().await.clone();
        let Some(token) = token else {
            return false;
        };
        if credential_is_current(&token, chrono::Utc::now().timestamp()) {
            return true;
        }
        warn!("Credential expired or unreadable");
        if let Err(e) = self.invalidate().await {
            warn!(error = %e, "Failed to remove stored credential");
        }
        false
    }
}

#[async_trait]
impl SessionAuthority for Session {
    async fn is_session_valid(&self) -> bool {
        self.is_valid().await
    }
}

/// Decode `token` as a JWT without verifying its signature and check `exp`.
///
/// A token without `exp` never expires. A token that is not a JWT is rejected.
fn credential_is_current(token: &str, now: i64) -> bool {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    match decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation) {
        Ok(data) => !matches!(data.claims.exp, Some(exp) if exp <= now),
        Err(e) => {
            debug!(error = %e, "Credential is not a readable JWT");
            false
        }
    }
}
