mod ids;

// Catalog entities
mod art;
mod art_type;

pub use ids::EntityId;

pub use art::{Art, ArtContext, ArtDraft, ArtEdit, ArtPayload};
pub use art_type::{ArtType, ArtTypeDraft, ArtTypeEdit, ArtTypePayload};
