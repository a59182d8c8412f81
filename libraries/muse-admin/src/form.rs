//! Create/edit form for one entity.

use crate::error::{AdminError, Result};
use muse_client::{ResourceApi, SessionAuthority};
use muse_core::{merge_or_synthesize, Draft, Entity, EntityId, SaveMode};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// A record the form saved, and whether it was a create or an update.
#[derive(Debug, Clone, PartialEq)]
pub struct Saved<E> {
    pub record: E,
    pub mode: SaveMode,
}

/// Keys the form reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
    Other,
}

/// What a key press did.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyOutcome<E> {
    /// Enter ran a submission; `None` when it did not complete
    Submitted(Option<Saved<E>>),
    /// Escape closed the form
    Cancelled,
    Ignored,
}

struct FormState<D> {
    draft: D,
    error: String,
    submitting: bool,
}

/// Resets `submitting` when the submission ends, however it ends.
struct SubmitClaim<'a, D> {
    state: &'a Mutex<FormState<D>>,
}

impl<D> Drop for SubmitClaim<'_, D> {
    fn drop(&mut self) {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .submitting = false;
    }
}

/// Drives one create or edit form.
///
/// The form edits an existing record when built with `Some(original)` and
/// creates a new one otherwise.
pub struct FormController<E: Entity> {
    api: Arc<dyn ResourceApi<E>>,
    authority: Arc<dyn SessionAuthority>,
    original: Option<E>,
    context: <E::Draft as Draft>::Context,
    state: Mutex<FormState<E::Draft>>,
    lifecycle: CancellationToken,
}

impl<E: Entity> FormController<E> {
    pub fn new(
        api: Arc<dyn ResourceApi<E>>,
        authority: Arc<dyn SessionAuthority>,
        original: Option<E>,
        context: <E::Draft as Draft>::Context,
        lifecycle: CancellationToken,
    ) -> Self {
        let draft = E::draft_for(original.as_ref(), &context);
        Self {
            api,
            authority,
            original,
            context,
            state: Mutex::new(FormState {
                draft,
                error: String::new(),
                submitting: false,
            }),
            lifecycle,
        }
    }

    fn lock(&self) -> MutexGuard<'_, FormState<E::Draft>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn original(&self) -> Option<&E> {
        self.original.as_ref()
    }

    pub fn context(&self) -> &<E::Draft as Draft>::Context {
        &self.context
    }

    pub fn draft(&self) -> E::Draft {
        self.lock().draft.clone()
    }

    /// Current error message, empty when there is none.
    pub fn error(&self) -> String {
        self.lock().error.clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.lock().submitting
    }

    /// Change one field. Clears the error.
    pub fn edit(&self, edit: <E::Draft as Draft>::Edit) {
        let mut state = self.lock();
        state.error.clear();
        state.draft.apply(edit);
    }

    fn claim(&self) -> Option<SubmitClaim<'_, E::Draft>> {
        let mut state = self.lock();
        if state.submitting {
            return None;
        }
        state.submitting = true;
        Some(SubmitClaim { state: &self.state })
    }

    /// Validate and save the draft.
    ///
    /// Returns `Ok(None)` without doing anything while another submission is
    /// in flight, and when the form was torn down before the response came
    /// back. On failure the error message is set and the error returned.
    pub async fn submit(&self) -> Result<Option<Saved<E>>> {
        if self.lifecycle.is_cancelled() {
            debug!(kind = E::KIND.path, "Submit ignored, form closed");
            return Ok(None);
        }
        let Some(_claim) = self.claim() else {
            debug!(kind = E::KIND.path, "Submit ignored, already submitting");
            return Ok(None);
        };
        let draft = self.draft();

        let outcome = self.save(&draft).await;
        if self.lifecycle.is_cancelled() {
            debug!(kind = E::KIND.path, "Form closed before save finished");
            return Ok(None);
        }

        match outcome {
            Ok(saved) => {
                self.lock().error.clear();
                info!(kind = E::KIND.path, id = %saved.record.id(), "Saved");
                Ok(Some(saved))
            }
            Err(e) => {
                let message = e.to_string();
                self.lock().error = if message.is_empty() {
                    E::KIND.messages.save_failed.to_string()
                } else {
                    message
                };
                Err(e)
            }
        }
    }

    async fn save(&self, draft: &E::Draft) -> Result<Saved<E>> {
        if !self.authority.is_session_valid().await {
            return Err(AdminError::SessionExpired);
        }
        draft.validate(&self.context)?;

        let (response, mode) = match &self.original {
            Some(original) => (
                self.api.update(original.id(), draft).await?,
                SaveMode::Updated,
            ),
            None => (self.api.create(draft).await?, SaveMode::Created),
        };
        if response.is_none() {
            warn!(kind = E::KIND.path, "Save returned no record, using local copy");
        }

        let record = merge_or_synthesize(
            self.original.as_ref(),
            draft,
            response,
            EntityId::generate_local,
        );
        Ok(Saved { record, mode })
    }

    /// Enter submits unless a submission is running; Escape cancels.
    pub async fn on_key(&self, key: Key) -> KeyOutcome<E> {
        match key {
            Key::Enter if !self.is_submitting() => {
                KeyOutcome::Submitted(self.submit().await.ok().flatten())
            }
            Key::Escape => KeyOutcome::Cancelled,
            _ => KeyOutcome::Ignored,
        }
    }

    /// Close the form. A save still in flight will not report back.
    pub fn teardown(&self) {
        self.lifecycle.cancel();
    }
}
