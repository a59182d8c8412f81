//! Muse Core
//!
//! Platform-agnostic catalog types, drafts and validation rules for the Muse
//! administration console.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `ArtType`, `Art` and their editable drafts
//! - **Core Traits**: `Entity` and `Draft`, which the resource client and the
//!   admin controllers are generic over
//! - **Validation**: the ordered field checks every form runs before submitting
//! - **Error Handling**: `ValidationError` and its `Result` alias
//!
//! # Example
//!
//! ```rust
//! use muse_core::{ArtType, Draft, Entity};
//!
//! let mut draft = ArtType::draft_for(None, &());
//! draft.apply(muse_core::ArtTypeEdit::Name("Escultura".into()));
//! draft.apply(muse_core::ArtTypeEdit::Description("Obras en volumen".into()));
//! assert!(draft.validate(&()).is_ok());
//! ```

#![forbid(unsafe_code)]

pub mod credentials;
pub mod dates;
pub mod entity;
pub mod error;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use credentials::{LoginCredentials, Registration};
pub use entity::{
    merge_or_synthesize, Draft, Entity, EntityKind, FormOptions, Messages, SaveMode, WriteMode,
};
pub use error::{Result, ValidationError};

pub use types::{
    Art, ArtContext, ArtDraft, ArtEdit, ArtPayload, ArtType, ArtTypeDraft, ArtTypeEdit,
    ArtTypePayload, EntityId,
};
