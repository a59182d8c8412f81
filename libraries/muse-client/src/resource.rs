//! Generic CRUD client for one administered resource.

use crate::error::{ClientError, Result};
use crate::session::Session;
use crate::types::ApiError;
use async_trait::async_trait;
use muse_core::{Entity, EntityId, WriteMode};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, warn};

/// Remote operations the admin controllers need for an entity kind.
///
/// Mutations return `None` when the server answers without a usable record;
/// callers synthesize one themselves.
#[async_trait]
pub trait ResourceApi<E: Entity>: Send + Sync {
    async fn list_all(&self) -> Result<Vec<E>>;

    async fn fetch_one(&self, id: &EntityId) -> Result<E>;

    async fn create(&self, draft: &E::Draft) -> Result<Option<E>>;

    async fn update(&self, id: &EntityId, draft: &E::Draft) -> Result<Option<E>>;

    async fn deactivate(&self, id: &EntityId) -> Result<Option<E>>;
}

/// HTTP implementation of [`ResourceApi`] rooted at `{base_url}/{kind.path}`.
pub struct ResourceClient<E> {
    http: Client,
    base_url: String,
    session: Arc<Session>,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for ResourceClient<E> {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            session: Arc::clone(&self.session),
            _entity: PhantomData,
        }
    }
}

#[derive(Clone, Copy)]
enum Op {
    List,
    Fetch,
    Create,
    Update,
    Deactivate,
}

impl<E: Entity> ResourceClient<E> {
    pub(crate) fn new(http: Client, base_url: String, session: Arc<Session>) -> Self {
        Self {
            http,
            base_url,
            session,
            _entity: PhantomData,
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, E::KIND.path)
    }

    fn item_url(&self, id: &EntityId) -> String {
        format!("{}/{}/{}", self.base_url, E::KIND.path, id)
    }

    async fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, "application/json");
        match self.session.bearer().await {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send the request and return the raw body of a 2xx response.
    async fn execute(&self, builder: RequestBuilder, op: Op) -> Result<Vec<u8>> {
        let response = builder.send().await.map_err(|e| {
            warn!(kind = E::KIND.path, error = %e, "Request failed before a response");
            ClientError::network(&e)
        })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::network(&e))?;

        if status.is_success() {
            debug!(kind = E::KIND.path, status = %status, bytes = body.len(), "Request succeeded");
            return Ok(body.to_vec());
        }

        let server_message = ApiError::message_from(&body);
        warn!(
            kind = E::KIND.path,
            status = %status,
            message = server_message.as_deref().unwrap_or(""),
            "Request rejected"
        );
        Err(rejection::<E>(status, server_message, op))
    }
}

fn generic_message<E: Entity>(op: Op) -> String {
    let kind = E::KIND;
    match op {
        Op::List => format!("Error al obtener {}", kind.plural),
        Op::Fetch => format!("Error al obtener {}", kind.singular),
        Op::Create => format!("Error al crear {}", kind.singular),
        Op::Update => format!("Error al actualizar {}", kind.singular),
        Op::Deactivate => format!("Error al desactivar {}", kind.singular),
    }
}

fn rejection<E: Entity>(status: StatusCode, server_message: Option<String>, op: Op) -> ClientError {
    match status {
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized {
            message: server_message.unwrap_or_else(|| "No autorizado".to_string()),
        },
        StatusCode::CONFLICT => ClientError::Conflict {
            message: server_message.unwrap_or_else(|| match op {
                Op::Deactivate => E::KIND.messages.in_use.to_string(),
                _ => generic_message::<E>(op),
            }),
        },
        _ => ClientError::Remote {
            status: status.as_u16(),
            message: server_message.unwrap_or_else(|| generic_message::<E>(op)),
        },
    }
}

/// Decode a list body: an array as-is, a single record wrapped, nothing as empty.
pub(crate) fn parse_collection<T: DeserializeOwned>(body: &[u8]) -> Result<Vec<T>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| ClientError::ParseError(e.to_string()))?;
    let items = match value {
        serde_json::Value::Null => return Ok(Vec::new()),
        serde_json::Value::Array(items) => items,
        single => vec![single],
    };
    items
        .into_iter()
        .map(|item| serde_json::from_value(item).map_err(|e| ClientError::ParseError(e.to_string())))
        .collect()
}

/// Decode a mutation body; anything that is not a record counts as no record.
pub(crate) fn parse_optional_record<T: DeserializeOwned>(body: &[u8]) -> Option<T> {
    match serde_json::from_slice::<Option<T>>(body) {
        Ok(record) => record,
        Err(e) => {
            if !body.iter().all(u8::is_ascii_whitespace) {
                debug!(error = %e, "Mutation response is not a record");
            }
            None
        }
    }
}

#[async_trait]
impl<E: Entity> ResourceApi<E> for ResourceClient<E> {
    async fn list_all(&self) -> Result<Vec<E>> {
        let url = self.collection_url();
        debug!(url = %url, "Listing {}", E::KIND.plural);
        let body = self
            .execute(self.request(Method::GET, &url).await, Op::List)
            .await?;
        parse_collection(&body)
    }

    async fn fetch_one(&self, id: &EntityId) -> Result<E> {
        let url = self.item_url(id);
        debug!(url = %url, "Fetching {}", E::KIND.singular);
        let body = self
            .execute(self.request(Method::GET, &url).await, Op::Fetch)
            .await?;
        serde_json::from_slice(&body).map_err(|e| ClientError::ParseError(e.to_string()))
    }

    async fn create(&self, draft: &E::Draft) -> Result<Option<E>> {
        let url = self.collection_url();
        let payload = E::payload(draft, WriteMode::Create);
        debug!(url = %url, "Creating {}", E::KIND.singular);
        let builder = self.request(Method::POST, &url).await.json(&payload);
        let body = self.execute(builder, Op::Create).await?;
        Ok(parse_optional_record(&body))
    }

    async fn update(&self, id: &EntityId, draft: &E::Draft) -> Result<Option<E>> {
        let url = self.item_url(id);
        let payload = E::payload(draft, WriteMode::Update);
        debug!(url = %url, "Updating {}", E::KIND.singular);
        let builder = self.request(Method::PUT, &url).await.json(&payload);
        let body = self.execute(builder, Op::Update).await?;
        Ok(parse_optional_record(&body))
    }

    async fn deactivate(&self, id: &EntityId) -> Result<Option<E>> {
        let url = self.item_url(id);
        debug!(url = %url, "Deactivating {}", E::KIND.singular);
        let body = self
            .execute(self.request(Method::DELETE, &url).await, Op::Deactivate)
            .await?;
        Ok(parse_optional_record(&body))
    }
}
