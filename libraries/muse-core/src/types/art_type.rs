//! Art type (catalog category)

use crate::entity::{Draft, Entity, EntityKind, FormOptions, Messages, WriteMode};
use crate::error::{Result, ValidationError};
use crate::types::EntityId;
use crate::validation::{self, MAX_DESCRIPTION_LEN, MAX_NAME_LEN};
use serde::{Deserialize, Serialize};

/// A category of art
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtType {
    #[serde(rename = "id_arttype")]
    pub id: EntityId,
    #[serde(rename = "arttypetname")]
    pub name: String,
    #[serde(rename = "typedescription", default)]
    pub description: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Editable fields of an art type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtTypeDraft {
    pub name: String,
    pub description: String,
    /// `None` means the caller never set it; a create then sends `true`
    pub active: Option<bool>,
}

/// Single-field change to an [`ArtTypeDraft`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtTypeEdit {
    Name(String),
    Description(String),
    Active(bool),
}

/// Request body for `POST /art_type` and `PUT /art_type/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtTypePayload {
    pub arttypetname: String,
    pub typedescription: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl Draft for ArtTypeDraft {
    type Edit = ArtTypeEdit;
    type Context = ();

    fn apply(&mut self, edit: ArtTypeEdit) {
        match edit {
            ArtTypeEdit::Name(v) => self.name = v,
            ArtTypeEdit::Description(v) => self.description = v,
            ArtTypeEdit::Active(v) => self.active = Some(v),
        }
    }

    fn validate(&self, _ctx: &()) -> Result<()> {
        validation::permitted_text(&self.name, ValidationError::NameCharacters)?;
        validation::permitted_text(&self.description, ValidationError::DescriptionCharacters)?;

        validation::required(&self.name, ValidationError::NameRequired)?;
        validation::required(&self.description, ValidationError::DescriptionRequired)?;
        validation::max_chars(
            &self.name,
            MAX_NAME_LEN,
            ValidationError::NameTooLong { max: MAX_NAME_LEN },
        )?;
        validation::max_chars(
            &self.description,
            MAX_DESCRIPTION_LEN,
            ValidationError::DescriptionTooLong {
                max: MAX_DESCRIPTION_LEN,
            },
        )
    }
}

const ART_TYPE_KIND: EntityKind = EntityKind {
    path: "art_type",
    singular: "tipo de arte",
    plural: "tipos de arte",
    messages: Messages {
        created: "Tipo de arte creado exitosamente",
        updated: "Tipo de arte actualizado exitosamente",
        deactivated: "Tipo de arte eliminado exitosamente",
        load_failed: "Error al cargar los tipos de arte",
        save_failed: "Error al guardar el tipo de arte",
        deactivate_failed: "Error al eliminar el tipo de arte",
        in_use: "Este tipo de arte tiene asignado obras de arte. No es posible borrarlo.",
    },
};

impl Entity for ArtType {
    type Draft = ArtTypeDraft;
    type Payload = ArtTypePayload;

    const KIND: &'static EntityKind = &ART_TYPE_KIND;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn draft_for(item: Option<&Self>, _ctx: &()) -> ArtTypeDraft {
        match item {
            Some(item) => ArtTypeDraft {
                name: item.name.clone(),
                description: item.description.clone(),
                active: Some(item.active),
            },
            None => ArtTypeDraft {
                active: Some(true),
                ..ArtTypeDraft::default()
            },
        }
    }

    fn form_context(_categories: &[ArtType], _options: &FormOptions) {}

    fn payload(draft: &ArtTypeDraft, mode: WriteMode) -> ArtTypePayload {
        ArtTypePayload {
            arttypetname: draft.name.trim().to_string(),
            typedescription: draft.description.trim().to_string(),
            active: match mode {
                WriteMode::Create => Some(draft.active.unwrap_or(true)),
                WriteMode::Update => draft.active,
            },
        }
    }

    fn overlay(&self, draft: &ArtTypeDraft) -> Self {
        Self {
            id: self.id.clone(),
            name: draft.name.clone(),
            description: draft.description.clone(),
            active: draft.active.unwrap_or(self.active),
        }
    }

    fn synthesize(id: EntityId, draft: &ArtTypeDraft) -> Self {
        Self {
            id,
            name: draft.name.clone(),
            description: draft.description.clone(),
            active: draft.active.unwrap_or(true),
        }
    }

    fn deactivation_prompt(&self) -> String {
        format!(
            "¿Estás seguro de eliminar el tipo de arte \"{}\"? \
             Si este tipo de arte tiene obras asociadas, no podrás eliminarlo.",
            self.name
        )
    }
}
