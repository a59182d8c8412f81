use super::{catalog, Console};
use crate::cli::{ArtTypeCommand, ArtTypeFields};
use anyhow::Result;
use muse_admin::ListController;
use muse_core::{ArtType, ArtTypeEdit};
use std::sync::Arc;

fn edits(fields: ArtTypeFields) -> Vec<ArtTypeEdit> {
    let mut edits = Vec::new();
    if let Some(name) = fields.name {
        edits.push(ArtTypeEdit::Name(name));
    }
    if let Some(description) = fields.description {
        edits.push(ArtTypeEdit::Description(description));
    }
    if let Some(active) = fields.active {
        edits.push(ArtTypeEdit::Active(active));
    }
    edits
}

pub async fn run(console: &Console, command: ArtTypeCommand) -> Result<()> {
    let api = console.client.art_types();
    let list = ListController::<ArtType>::new(Arc::new(api.clone()), console.session.clone())
        .with_options(console.config.form_options());

    match command {
        ArtTypeCommand::List => catalog::list(&list).await,
        ArtTypeCommand::Show { id } => catalog::show(&list, &api, &id).await,
        ArtTypeCommand::Create(fields) => {
            list.load().await;
            catalog::save(&list, None, edits(fields)).await
        }
        ArtTypeCommand::Update { id, fields } => {
            let original = catalog::original(&api, &id).await?;
            list.load().await;
            catalog::save(&list, Some(&original), edits(fields)).await
        }
        ArtTypeCommand::Deactivate { id, yes } => {
            catalog::deactivate(&list, &api, &id, yes).await
        }
    }
}
