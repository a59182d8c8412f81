//! Main Muse API client.

use crate::auth::AuthClient;
use crate::error::{ClientError, Result};
use crate::resource::ResourceClient;
use crate::session::Session;
use crate::types::{ClientConfig, LoginResponse, UserInfo};
use muse_core::{Art, ArtType, Entity, LoginCredentials, Registration};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Client for the Muse catalog API.
///
/// Owns the HTTP connection pool and shares the [`Session`] with every
/// resource client it hands out.
///
/// # Example
///
/// ```ignore
/// use muse_client::{ClientConfig, MuseClient, ResourceApi, Session};
/// use muse_core::LoginCredentials;
/// use std::sync::Arc;
///
/// let session = Arc::new(Session::new());
/// let client = MuseClient::new(ClientConfig::new("http://localhost:8000"), session)?;
///
/// client.login(&LoginCredentials::new("ana@muse.pe", "secreto")).await?;
/// let types = client.art_types().list_all().await?;
/// println!("{} art types", types.len());
/// ```
#[derive(Clone)]
pub struct MuseClient {
    http: Client,
    base_url: String,
    session: Arc<Session>,
}

impl MuseClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig, session: Arc<Session>) -> Result<Self> {
        let base_url = normalize_url(&config.url)?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(format!("MuseAdmin/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    /// The normalized base URL.
    pub fn url(&self) -> &str {
        &self.base_url
    }

    /// The session shared by every request.
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// A client for any entity kind.
    pub fn resource<E: Entity>(&self) -> ResourceClient<E> {
        ResourceClient::new(
            self.http.clone(),
            self.base_url.clone(),
            Arc::clone(&self.session),
        )
    }

    pub fn art_types(&self) -> ResourceClient<ArtType> {
        self.resource()
    }

    pub fn arts(&self) -> ResourceClient<Art> {
        self.resource()
    }

    /// Authentication operations bound to this client's session.
    pub fn auth(&self) -> AuthClient<'_> {
        AuthClient::new(&self.http, &self.base_url, &self.session)
    }

    /// Login and store the returned credential in the session.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<LoginResponse> {
        self.auth().login(credentials).await
    }

    pub async fn register(&self, registration: &Registration) -> Result<Option<UserInfo>> {
        self.auth().register(registration).await
    }

    pub async fn logout(&self) -> Result<()> {
        self.auth().logout().await
    }
}

fn normalize_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
    }
    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        return Err(ClientError::InvalidUrl(
            "URL must start with http:// or https://".into(),
        ));
    }
    Url::parse(trimmed).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
    Ok(trimmed.trim_end_matches('/').to_string())
}
