//! List screen for one entity kind.

use crate::error::{AdminError, Result};
use crate::form::{FormController, Saved};
use crate::transient::TransientSlot;
use muse_client::{ResourceApi, SessionAuthority};
use muse_core::{ArtType, Entity, EntityId, FormOptions, SaveMode};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// How long a just-saved row stays highlighted.
pub const HIGHLIGHT_DURATION: Duration = Duration::from_secs(2);

/// How long a success message stays visible.
pub const SUCCESS_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Ready,
}

/// Yes/no question shown before a deactivation.
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Result of asking to deactivate a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeactivateOutcome {
    /// The record is already inactive
    NotOffered,
    /// The session check failed; nothing was asked or sent
    SessionExpired,
    /// The user answered no
    Declined,
    Deactivated,
    /// The view closed before the answer arrived
    Abandoned,
    /// The remote service refused; the message is also the list error
    Failed { message: String, conflict: bool },
}

/// One rendered row.
#[derive(Debug, Clone, PartialEq)]
pub struct Row<E> {
    pub record: E,
    pub highlighted: bool,
    pub can_deactivate: bool,
}

/// Snapshot of everything the list screen renders.
#[derive(Debug, Clone, PartialEq)]
pub struct ListView<E> {
    pub phase: Phase,
    pub rows: Vec<Row<E>>,
    pub categories: Vec<ArtType>,
    pub error: Option<String>,
    pub success: Option<String>,
}

struct ListState<E> {
    phase: Phase,
    items: Vec<E>,
    categories: Vec<ArtType>,
    error: Option<String>,
}

/// Loads, refreshes and mutates the records of one list screen.
///
/// Timers and in-flight responses are tied to the controller's lifecycle:
/// after [`ListController::teardown`] (or drop) nothing updates the state.
pub struct ListController<E: Entity> {
    api: Arc<dyn ResourceApi<E>>,
    categories_api: Option<Arc<dyn ResourceApi<ArtType>>>,
    authority: Arc<dyn SessionAuthority>,
    options: FormOptions,
    state: Mutex<ListState<E>>,
    highlight: TransientSlot<EntityId>,
    success: TransientSlot<String>,
    lifecycle: CancellationToken,
}

impl<E: Entity> ListController<E> {
    pub fn new(api: Arc<dyn ResourceApi<E>>, authority: Arc<dyn SessionAuthority>) -> Self {
        let lifecycle = CancellationToken::new();
        Self {
            api,
            categories_api: None,
            authority,
            options: FormOptions::default(),
            state: Mutex::new(ListState {
                phase: Phase::Loading,
                items: Vec::new(),
                categories: Vec::new(),
                error: None,
            }),
            highlight: TransientSlot::new(HIGHLIGHT_DURATION, &lifecycle),
            success: TransientSlot::new(SUCCESS_DURATION, &lifecycle),
            lifecycle,
        }
    }

    /// Also load the art type collection after the primary one.
    pub fn with_categories(mut self, api: Arc<dyn ResourceApi<ArtType>>) -> Self {
        self.categories_api = Some(api);
        self
    }

    pub fn with_options(mut self, options: FormOptions) -> Self {
        self.options = options;
        self
    }

    fn lock(&self) -> MutexGuard<'_, ListState<E>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_torn_down(&self) -> bool {
        self.lifecycle.is_cancelled()
    }

    /// Fetch the collection. Does nothing without a valid session.
    ///
    /// A failure keeps the previously loaded rows and sets the error.
    pub async fn load(&self) {
        if !self.authority.is_session_valid().await {
            debug!(kind = E::KIND.path, "Load skipped, session not valid");
            return;
        }
        if self.is_torn_down() {
            return;
        }
        {
            let mut state = self.lock();
            state.phase = Phase::Loading;
            state.error = None;
        }

        let primary = self.api.list_all().await;
        if self.is_torn_down() {
            return;
        }
        match primary {
            Ok(items) => {
                debug!(kind = E::KIND.path, count = items.len(), "Loaded");
                self.lock().items = items;
            }
            Err(e) => {
                warn!(kind = E::KIND.path, error = %e, "Load failed");
                let message = e.to_string();
                let mut state = self.lock();
                state.error = Some(if message.is_empty() {
                    E::KIND.messages.load_failed.to_string()
                } else {
                    message
                });
                state.phase = Phase::Ready;
                return;
            }
        }

        if let Some(categories_api) = &self.categories_api {
            let categories = categories_api.list_all().await.unwrap_or_else(|e| {
                warn!(error = %e, "Failed to load art types, continuing without them");
                Vec::new()
            });
            if self.is_torn_down() {
                return;
            }
            self.lock().categories = categories;
        }

        self.lock().phase = Phase::Ready;
    }

    /// Build a form for `item`, or for a new record.
    pub fn form(&self, item: Option<&E>) -> FormController<E> {
        let context = E::form_context(&self.lock().categories, &self.options);
        FormController::new(
            Arc::clone(&self.api),
            Arc::clone(&self.authority),
            item.cloned(),
            context,
            self.lifecycle.child_token(),
        )
    }

    /// Submit `form` and, on success, refresh the list.
    pub async fn submit_form(&self, form: &FormController<E>) -> Result<Option<Saved<E>>> {
        let saved = form.submit().await?;
        if let Some(saved) = &saved {
            self.on_saved(saved).await;
        }
        Ok(saved)
    }

    /// Reload, highlight the saved row and show the success message.
    pub async fn on_saved(&self, saved: &Saved<E>) {
        self.load().await;
        if self.is_torn_down() {
            return;
        }
        let messages = &E::KIND.messages;
        self.highlight.set(saved.record.id().clone());
        self.success.set(
            match saved.mode {
                SaveMode::Created => messages.created,
                SaveMode::Updated => messages.updated,
            }
            .to_string(),
        );
    }

    /// Ask, then deactivate `item` and reload.
    ///
    /// Nothing is removed locally; on failure the list stays as last loaded.
    pub async fn deactivate(&self, item: &E, confirm: &dyn Confirm) -> DeactivateOutcome {
        if !item.is_active() {
            return DeactivateOutcome::NotOffered;
        }
        if !self.authority.is_session_valid().await {
            return DeactivateOutcome::SessionExpired;
        }
        if !confirm.confirm(&item.deactivation_prompt()) {
            return DeactivateOutcome::Declined;
        }

        let result = self.api.deactivate(item.id()).await;
        if self.is_torn_down() {
            return DeactivateOutcome::Abandoned;
        }
        match result {
            Ok(_) => {
                info!(kind = E::KIND.path, id = %item.id(), label = item.label(), "Deactivated");
                self.load().await;
                self.success.set(E::KIND.messages.deactivated.to_string());
                DeactivateOutcome::Deactivated
            }
            Err(e) => {
                let error = AdminError::from(e);
                let conflict = error.is_conflict();
                let message = error.to_string();
                let message = if message.is_empty() {
                    E::KIND.messages.deactivate_failed.to_string()
                } else {
                    message
                };
                warn!(kind = E::KIND.path, id = %item.id(), error = %message, "Deactivation refused");
                self.lock().error = Some(message.clone());
                DeactivateOutcome::Failed { message, conflict }
            }
        }
    }

    pub fn items(&self) -> Vec<E> {
        self.lock().items.clone()
    }

    pub fn categories(&self) -> Vec<ArtType> {
        self.lock().categories.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    pub fn success(&self) -> Option<String> {
        self.success.get()
    }

    pub fn highlighted(&self) -> Option<EntityId> {
        self.highlight.get()
    }

    /// Snapshot for rendering.
    pub fn view(&self) -> ListView<E> {
        let highlighted = self.highlight.get();
        let state = self.lock();
        ListView {
            phase: state.phase,
            rows: state
                .items
                .iter()
                .map(|record| Row {
                    highlighted: highlighted.as_ref() == Some(record.id()),
                    can_deactivate: record.is_active(),
                    record: record.clone(),
                })
                .collect(),
            categories: state.categories.clone(),
            error: state.error.clone(),
            success: self.success.get(),
        }
    }

    /// Cancel timers and ignore responses still in flight.
    pub fn teardown(&self) {
        self.lifecycle.cancel();
    }
}

impl<E: Entity> Drop for ListController<E> {
    fn drop(&mut self) {
        self.lifecycle.cancel();
    }
}
