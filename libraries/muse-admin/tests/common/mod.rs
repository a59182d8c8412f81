//! In-memory stand-ins for the remote service and the session authority.

#![allow(dead_code)]

use async_trait::async_trait;
use muse_client::{ClientError, ResourceApi, Result, SessionAuthority};
use muse_core::{Art, ArtType, Draft, Entity, EntityId};
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub struct FakeAuthority {
    valid: AtomicBool,
    pub checks: AtomicUsize,
}

impl FakeAuthority {
    pub fn new(valid: bool) -> Arc<Self> {
        Arc::new(Self {
            valid: AtomicBool::new(valid),
            checks: AtomicUsize::new(0),
        })
    }

    pub fn set_valid(&self, valid: bool) {
        self.valid.store(valid, Ordering::SeqCst);
    }

    pub fn checks(&self) -> usize {
        self.checks.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionAuthority for FakeAuthority {
    async fn is_session_valid(&self) -> bool {
        self.checks.fetch_add(1, Ordering::SeqCst);
        self.valid.load(Ordering::SeqCst)
    }
}

#[derive(Default)]
pub struct Calls {
    pub list: AtomicUsize,
    pub create: AtomicUsize,
    pub update: AtomicUsize,
    pub deactivate: AtomicUsize,
}

impl Calls {
    pub fn get(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

/// Remote collection kept in memory.
///
/// Mutations answer with no record unless `echo` is set, which is the case
/// the forms must cover with a locally built record.
pub struct FakeApi<E> {
    pub records: Mutex<Vec<E>>,
    pub calls: Calls,
    pub echo: AtomicBool,
    pub latency: Mutex<Duration>,
    pub list_failure: Mutex<Option<String>>,
    pub conflict_on_deactivate: Mutex<Option<String>>,
    next_id: AtomicI64,
}

impl<E: Entity> FakeApi<E> {
    pub fn new(records: Vec<E>) -> Arc<Self> {
        Arc::new(Self {
            records: Mutex::new(records),
            calls: Calls::default(),
            echo: AtomicBool::new(false),
            latency: Mutex::new(Duration::ZERO),
            list_failure: Mutex::new(None),
            conflict_on_deactivate: Mutex::new(None),
            next_id: AtomicI64::new(100),
        })
    }

    pub fn with_latency(self: Arc<Self>, latency: Duration) -> Arc<Self> {
        *self.latency.lock().unwrap() = latency;
        self
    }

    pub fn fail_lists(&self, message: &str) {
        *self.list_failure.lock().unwrap() = Some(message.to_string());
    }

    pub fn refuse_deactivation(&self, message: &str) {
        *self.conflict_on_deactivate.lock().unwrap() = Some(message.to_string());
    }

    pub fn records(&self) -> Vec<E> {
        self.records.lock().unwrap().clone()
    }

    async fn wait(&self) {
        let latency = *self.latency.lock().unwrap();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
    }

    fn answer(&self, record: E) -> Option<E> {
        self.echo.load(Ordering::SeqCst).then_some(record)
    }
}

#[async_trait]
impl<E: Entity> ResourceApi<E> for FakeApi<E>
where
    E: Deactivate,
{
    async fn list_all(&self) -> Result<Vec<E>> {
        self.calls.list.fetch_add(1, Ordering::SeqCst);
        self.wait().await;
        if let Some(message) = self.list_failure.lock().unwrap().clone() {
            return Err(ClientError::Remote {
                status: 500,
                message,
            });
        }
        Ok(self.records())
    }

    async fn fetch_one(&self, id: &EntityId) -> Result<E> {
        self.records()
            .into_iter()
            .find(|r| r.id() == id)
            .ok_or_else(|| ClientError::Remote {
                status: 404,
                message: format!("Error al obtener {}", E::KIND.singular),
            })
    }

    async fn create(&self, draft: &E::Draft) -> Result<Option<E>> {
        self.calls.create.fetch_add(1, Ordering::SeqCst);
        self.wait().await;
        let id = EntityId::from(self.next_id.fetch_add(1, Ordering::SeqCst));
        let record = E::synthesize(id, draft);
        self.records.lock().unwrap().push(record.clone());
        Ok(self.answer(record))
    }

    async fn update(&self, id: &EntityId, draft: &E::Draft) -> Result<Option<E>> {
        self.calls.update.fetch_add(1, Ordering::SeqCst);
        self.wait().await;
        let mut records = self.records.lock().unwrap();
        let Some(slot) = records.iter_mut().find(|r| r.id() == id) else {
            return Err(ClientError::Remote {
                status: 404,
                message: format!("Error al actualizar {}", E::KIND.singular),
            });
        };
        *slot = slot.overlay(draft);
        let record = slot.clone();
        drop(records);
        Ok(self.answer(record))
    }

    async fn deactivate(&self, id: &EntityId) -> Result<Option<E>> {
        self.calls.deactivate.fetch_add(1, Ordering::SeqCst);
        self.wait().await;
        if let Some(message) = self.conflict_on_deactivate.lock().unwrap().clone() {
            return Err(ClientError::Conflict { message });
        }
        let mut records = self.records.lock().unwrap();
        if let Some(slot) = records.iter_mut().find(|r| r.id() == id) {
            slot.mark_inactive();
        }
        Ok(None)
    }
}

/// Soft delete for the fake store.
pub trait Deactivate {
    fn mark_inactive(&mut self);
}

impl Deactivate for ArtType {
    fn mark_inactive(&mut self) {
        self.active = false;
    }
}

impl Deactivate for Art {
    fn mark_inactive(&mut self) {
        self.active = false;
    }
}

pub fn art_type(id: i64, name: &str) -> ArtType {
    ArtType {
        id: EntityId::from(id),
        name: name.to_string(),
        description: format!("Obras de {name}"),
        active: true,
    }
}

pub fn art(id: i64, title: &str, type_id: i64) -> Art {
    Art {
        id: EntityId::from(id),
        title: title.to_string(),
        description: "Obra del catálogo".to_string(),
        creation_date_raw: "2023-05-10".to_string(),
        type_id: EntityId::from(type_id),
        image_url: Some("https://img.muse.pe/obra.jpg".to_string()),
        active: true,
        type_name: None,
    }
}

/// Make sure a draft is complete before it reaches the fake.
pub fn assert_valid<D: Draft>(draft: &D, ctx: &D::Context) {
    assert!(draft.validate(ctx).is_ok());
}
