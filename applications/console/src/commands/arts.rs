use super::{catalog, Console};
use crate::cli::{ArtCommand, ArtFields};
use anyhow::Result;
use muse_admin::ListController;
use muse_core::{Art, ArtEdit, EntityId};
use std::sync::Arc;

fn edits(fields: ArtFields) -> Vec<ArtEdit> {
    let mut edits = Vec::new();
    if let Some(title) = fields.title {
        edits.push(ArtEdit::Title(title));
    }
    if let Some(description) = fields.description {
        edits.push(ArtEdit::Description(description));
    }
    if let Some(date) = fields.creation_date {
        edits.push(ArtEdit::CreationDate(date));
    }
    if let Some(category) = fields.category {
        let category = category.trim();
        edits.push(ArtEdit::Category(
            (!category.is_empty()).then(|| EntityId::new(category)),
        ));
    }
    if let Some(url) = fields.image_url {
        edits.push(ArtEdit::ImageUrl(url));
    }
    if let Some(active) = fields.active {
        edits.push(ArtEdit::Active(active));
    }
    edits
}

pub async fn run(console: &Console, command: ArtCommand) -> Result<()> {
    let api = console.client.arts();
    let list = ListController::<Art>::new(Arc::new(api.clone()), console.session.clone())
        .with_categories(Arc::new(console.client.art_types()))
        .with_options(console.config.form_options());

    match command {
        ArtCommand::List => catalog::list(&list).await,
        ArtCommand::Show { id } => catalog::show(&list, &api, &id).await,
        ArtCommand::Create(fields) => {
            list.load().await;
            catalog::save(&list, None, edits(fields)).await
        }
        ArtCommand::Update { id, fields } => {
            let original = catalog::original(&api, &id).await?;
            list.load().await;
            catalog::save(&list, Some(&original), edits(fields)).await
        }
        ArtCommand::Deactivate { id, yes } => catalog::deactivate(&list, &api, &id, yes).await,
    }
}
