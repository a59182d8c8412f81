/// Entity abstraction shared by the resource client and the admin controllers
use crate::error::Result;
use crate::types::{ArtType, EntityId};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Static description of an administered resource kind.
#[derive(Debug)]
pub struct EntityKind {
    /// Path segment on the remote service (`/art_type`, `/art`)
    pub path: &'static str,
    /// Singular noun used in generic messages
    pub singular: &'static str,
    /// Plural noun used in generic messages
    pub plural: &'static str,
    /// User-facing messages for list and form screens
    pub messages: Messages,
}

/// User-facing copy for one entity kind.
#[derive(Debug)]
pub struct Messages {
    pub created: &'static str,
    pub updated: &'static str,
    pub deactivated: &'static str,
    pub load_failed: &'static str,
    pub save_failed: &'static str,
    pub deactivate_failed: &'static str,
    /// Shown when the server refuses a deactivation because dependents exist
    pub in_use: &'static str,
}

/// Whether a payload is being built for a create or an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Create,
    Update,
}

/// Outcome phrasing for a successful form submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    Created,
    Updated,
}

/// Form behavior switches that are policy rather than data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormOptions {
    /// Require an image URL on Art even though the record allows none
    pub require_art_image: bool,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            require_art_image: true,
        }
    }
}

/// In-progress field set a user is editing.
pub trait Draft: Clone + Send + Sync + 'static {
    /// A single-field change
    type Edit: Send;
    /// Data the validation needs beyond the draft itself
    type Context: Clone + Send + Sync + 'static;

    /// Apply one field change, leaving every other field untouched.
    fn apply(&mut self, edit: Self::Edit);

    /// Run the ordered validation chain; the first failure wins.
    fn validate(&self, ctx: &Self::Context) -> Result<()>;
}

/// A record administered through the console.
pub trait Entity: Clone + Send + Sync + DeserializeOwned + 'static {
    type Draft: Draft;
    type Payload: Serialize + Send + Sync;

    const KIND: &'static EntityKind;

    fn id(&self) -> &EntityId;

    /// Name or title, used in confirmations and logs
    fn label(&self) -> &str;

    fn is_active(&self) -> bool;

    /// Initial draft for a form: the item's fields, or blanks for a new record.
    fn draft_for(item: Option<&Self>, ctx: &<Self::Draft as Draft>::Context) -> Self::Draft;

    /// Form context derived from the loaded category list.
    fn form_context(
        categories: &[ArtType],
        options: &FormOptions,
    ) -> <Self::Draft as Draft>::Context;

    /// Request body for a create or update.
    fn payload(draft: &Self::Draft, mode: WriteMode) -> Self::Payload;

    /// This record with every draft field laid over it.
    fn overlay(&self, draft: &Self::Draft) -> Self;

    /// A new record built from a draft and a client-side id.
    fn synthesize(id: EntityId, draft: &Self::Draft) -> Self;

    /// Yes/no question asked before deactivating this record.
    fn deactivation_prompt(&self) -> String;
}

/// Pick the record to surface after a successful save.
///
/// A record returned by the server always wins. Without one, an update overlays
/// the draft on the original item and a create builds a record around
/// `fresh_id`, which is only called in that case.
pub fn merge_or_synthesize<E, F>(
    original: Option<&E>,
    draft: &E::Draft,
    response: Option<E>,
    fresh_id: F,
) -> E
where
    E: Entity,
    F: FnOnce() -> EntityId,
{
    match (response, original) {
        (Some(saved), _) => saved,
        (None, Some(original)) => original.overlay(draft),
        (None, None) => E::synthesize(fresh_id(), draft),
    }
}
