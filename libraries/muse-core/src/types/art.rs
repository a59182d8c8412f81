//! Art (catalog item)

use crate::dates;
use crate::entity::{Draft, Entity, EntityKind, FormOptions, Messages, WriteMode};
use crate::error::{Result, ValidationError};
use crate::types::{ArtType, EntityId};
use crate::validation::{self, MAX_DESCRIPTION_LEN, MAX_NAME_LEN};
use serde::{Deserialize, Serialize};

/// A work of art belonging to one art type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Art {
    #[serde(rename = "id_art")]
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Raw date as the server sent it; see [`Art::creation_date`]
    #[serde(rename = "creation_date", default)]
    pub creation_date_raw: String,
    #[serde(rename = "id_art_type", default)]
    pub type_id: EntityId,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
    /// Category name joined in by the server, display only
    #[serde(rename = "arttypetname", default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
}

fn default_active() -> bool {
    true
}

impl Art {
    /// Creation date normalized to `YYYY-MM-DD`, empty when unparsable
    pub fn creation_date(&self) -> String {
        dates::format_for_input(&self.creation_date_raw)
    }

    /// Category label for list rows.
    ///
    /// Prefers the server-joined name, then a matching loaded category, then
    /// the raw id.
    pub fn category_label<'a>(&'a self, categories: &'a [ArtType]) -> &'a str {
        if let Some(name) = self.type_name.as_deref().filter(|n| !n.trim().is_empty()) {
            return name;
        }
        if let Some(category) = categories.iter().find(|c| c.id == self.type_id) {
            return &category.name;
        }
        if self.type_id.is_empty() {
            "Sin tipo"
        } else {
            self.type_id.as_str()
        }
    }
}

/// Editable fields of an art record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtDraft {
    pub title: String,
    pub description: String,
    /// `YYYY-MM-DD`, or empty
    pub creation_date: String,
    pub type_id: Option<EntityId>,
    pub image_url: String,
    pub active: Option<bool>,
    /// Category the stored record already carries; kept even when it is no
    /// longer offered for selection
    pub stored_type_id: Option<EntityId>,
}

/// Single-field change to an [`ArtDraft`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtEdit {
    Title(String),
    Description(String),
    CreationDate(String),
    Category(Option<EntityId>),
    ImageUrl(String),
    Active(bool),
}

/// What the art form validates against
#[derive(Debug, Clone, Default)]
pub struct ArtContext {
    /// Categories currently offered for selection (active ones only)
    pub categories: Vec<ArtType>,
    pub require_image: bool,
}

impl ArtContext {
    pub fn new(categories: &[ArtType], options: &FormOptions) -> Self {
        Self {
            categories: categories.iter().filter(|c| c.active).cloned().collect(),
            require_image: options.require_art_image,
        }
    }

    fn offers(&self, id: &EntityId) -> bool {
        self.categories.iter().any(|c| &c.id == id)
    }
}

/// Request body for `POST /art` and `PUT /art/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtPayload {
    pub id_art_type: Option<EntityId>,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub creation_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl Draft for ArtDraft {
    type Edit = ArtEdit;
    type Context = ArtContext;

    fn apply(&mut self, edit: ArtEdit) {
        match edit {
            ArtEdit::Title(v) => self.title = v,
            ArtEdit::Description(v) => self.description = v,
            ArtEdit::CreationDate(v) => self.creation_date = v,
            ArtEdit::Category(v) => self.type_id = v,
            ArtEdit::ImageUrl(v) => self.image_url = v,
            ArtEdit::Active(v) => self.active = Some(v),
        }
    }

    fn validate(&self, ctx: &ArtContext) -> Result<()> {
        validation::permitted_text(&self.title, ValidationError::TitleCharacters)?;
        validation::permitted_text(&self.description, ValidationError::DescriptionCharacters)?;

        validation::required(&self.title, ValidationError::TitleRequired)?;
        validation::required(&self.description, ValidationError::DescriptionRequired)?;
        validation::max_chars(
            &self.title,
            MAX_NAME_LEN,
            ValidationError::TitleTooLong { max: MAX_NAME_LEN },
        )?;
        validation::max_chars(
            &self.description,
            MAX_DESCRIPTION_LEN,
            ValidationError::DescriptionTooLong {
                max: MAX_DESCRIPTION_LEN,
            },
        )?;
        validation::required(&self.creation_date, ValidationError::CreationDateRequired)?;
        if dates::parse_input(&self.creation_date).is_none() {
            return Err(ValidationError::CreationDateInvalid);
        }
        match &self.type_id {
            None => return Err(ValidationError::CategoryRequired),
            Some(id) if id.is_empty() => return Err(ValidationError::CategoryRequired),
            Some(id) if !ctx.offers(id) && self.stored_type_id.as_ref() != Some(id) => {
                return Err(ValidationError::CategoryUnavailable)
            }
            Some(_) => {}
        }

        validation::optional_image_url(&self.image_url)?;

        if ctx.require_image && self.image_url.trim().is_empty() {
            return Err(ValidationError::ImageUrlRequired);
        }
        Ok(())
    }
}

const ART_KIND: EntityKind = EntityKind {
    path: "art",
    singular: "obra de arte",
    plural: "obras de arte",
    messages: Messages {
        created: "Obra de arte creada exitosamente",
        updated: "Obra de arte actualizada exitosamente",
        deactivated: "Obra de arte eliminada exitosamente",
        load_failed: "Error al cargar las obras de arte",
        save_failed: "Error al guardar la obra de arte",
        deactivate_failed: "Error al eliminar la obra de arte",
        in_use: "Esta obra de arte no puede eliminarse en este momento.",
    },
};

impl Entity for Art {
    type Draft = ArtDraft;
    type Payload = ArtPayload;

    const KIND: &'static EntityKind = &ART_KIND;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn label(&self) -> &str {
        &self.title
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn draft_for(item: Option<&Self>, ctx: &ArtContext) -> ArtDraft {
        let default_category = ctx.categories.first().map(|c| c.id.clone());
        match item {
            Some(item) => ArtDraft {
                title: item.title.clone(),
                description: item.description.clone(),
                creation_date: item.creation_date(),
                type_id: if item.type_id.is_empty() {
                    default_category
                } else {
                    Some(item.type_id.clone())
                },
                image_url: item.image_url.clone().unwrap_or_default(),
                active: Some(item.active),
                stored_type_id: (!item.type_id.is_empty()).then(|| item.type_id.clone()),
            },
            None => ArtDraft {
                type_id: default_category,
                active: Some(true),
                ..ArtDraft::default()
            },
        }
    }

    fn form_context(categories: &[ArtType], options: &FormOptions) -> ArtContext {
        ArtContext::new(categories, options)
    }

    fn payload(draft: &ArtDraft, mode: WriteMode) -> ArtPayload {
        let image_url = draft.image_url.trim();
        ArtPayload {
            id_art_type: draft.type_id.clone(),
            title: draft.title.trim().to_string(),
            description: draft.description.trim().to_string(),
            image_url: (!image_url.is_empty()).then(|| image_url.to_string()),
            creation_date: draft.creation_date.trim().to_string(),
            active: match mode {
                WriteMode::Create => Some(draft.active.unwrap_or(true)),
                WriteMode::Update => draft.active,
            },
        }
    }

    fn overlay(&self, draft: &ArtDraft) -> Self {
        Self {
            id: self.id.clone(),
            title: draft.title.clone(),
            description: draft.description.clone(),
            creation_date_raw: draft.creation_date.clone(),
            type_id: draft.type_id.clone().unwrap_or_else(|| self.type_id.clone()),
            image_url: Some(draft.image_url.clone()).filter(|u| !u.is_empty()),
            active: draft.active.unwrap_or(self.active),
            type_name: self.type_name.clone(),
        }
    }

    fn synthesize(id: EntityId, draft: &ArtDraft) -> Self {
        Self {
            id,
            title: draft.title.clone(),
            description: draft.description.clone(),
            creation_date_raw: draft.creation_date.clone(),
            type_id: draft.type_id.clone().unwrap_or_default(),
            image_url: Some(draft.image_url.clone()).filter(|u| !u.is_empty()),
            active: draft.active.unwrap_or(true),
            type_name: None,
        }
    }

    fn deactivation_prompt(&self) -> String {
        format!(
            "¿Estás seguro de eliminar la obra de arte \"{}\"?",
            self.title
        )
    }
}
