//! Handlers shared by every entity kind.

use super::{AssumeYes, StdinConfirm};
use crate::render::{self, Render};
use anyhow::{anyhow, bail, Result};
use muse_admin::{Confirm, DeactivateOutcome, ListController};
use muse_client::ResourceApi;
use muse_core::{Draft, EntityId};

pub async fn list<E: Render>(list: &ListController<E>) -> Result<()> {
    list.load().await;
    print!("{}", render::table(&list.view()));
    match list.error() {
        Some(error) => bail!(error),
        None => Ok(()),
    }
}

pub async fn show<E: Render>(
    list: &ListController<E>,
    api: &dyn ResourceApi<E>,
    id: &str,
) -> Result<()> {
    list.load().await;
    let record = api.fetch_one(&EntityId::new(id)).await?;
    print!("{}", render::details(&record, &list.categories()));
    Ok(())
}

/// Fetch the record an update starts from.
pub async fn original<E: Render>(api: &dyn ResourceApi<E>, id: &str) -> Result<E> {
    Ok(api.fetch_one(&EntityId::new(id)).await?)
}

/// Fill a form with `edits`, submit it and print the refreshed list.
pub async fn save<E: Render>(
    list: &ListController<E>,
    original: Option<&E>,
    edits: Vec<<E::Draft as Draft>::Edit>,
) -> Result<()> {
    let form = list.form(original);
    for edit in edits {
        form.edit(edit);
    }

    match list.submit_form(&form).await {
        Ok(Some(_)) => {
            print!("{}", render::table(&list.view()));
            Ok(())
        }
        Ok(None) => bail!(E::KIND.messages.save_failed),
        Err(_) => Err(anyhow!(form.error())),
    }
}

pub async fn deactivate<E: Render>(
    list: &ListController<E>,
    api: &dyn ResourceApi<E>,
    id: &str,
    yes: bool,
) -> Result<()> {
    list.load().await;
    let item = api.fetch_one(&EntityId::new(id)).await?;
    let confirm: &dyn Confirm = if yes { &AssumeYes } else { &StdinConfirm };

    match list.deactivate(&item, confirm).await {
        DeactivateOutcome::Deactivated => {
            print!("{}", render::table(&list.view()));
            Ok(())
        }
        DeactivateOutcome::Declined => {
            println!("Operación cancelada.");
            Ok(())
        }
        DeactivateOutcome::NotOffered => bail!("\"{}\" ya está inactivo.", item.label()),
        DeactivateOutcome::SessionExpired => bail!(super::RELOGIN_HINT),
        DeactivateOutcome::Abandoned => bail!("Sesión interrumpida"),
        DeactivateOutcome::Failed { message, .. } => bail!(message),
    }
}
