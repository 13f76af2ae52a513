use log::{debug, info};
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryOrder,
    Set, TransactionTrait,
};
use serde::Deserialize;

use super::required;
use crate::entity::{bios, external, helpers, speakers};
use crate::error::{ModelError, Result};

#[derive(Debug, Default, Clone, Deserialize)]
pub struct SpeakerAttributes {
    pub name: Option<String>,
}

pub async fn create(
    db: &DatabaseConnection,
    attrs: SpeakerAttributes,
) -> Result<speakers::Model> {
    let speaker = speakers::ActiveModel {
        name: Set(required(attrs.name, "name")?),
        ..Default::default()
    };

    let txn = db.begin().await?;
    let speaker = speaker.insert(&txn).await?;
    txn.commit().await?;

    debug!("Created {speaker}");
    Ok(speaker)
}

pub async fn read(db: &DatabaseConnection, id: i32) -> Result<speakers::Model> {
    speakers::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ModelError::not_found("speaker", id))
}

/// The speaker with its bio inlined.
pub async fn read_external(db: &DatabaseConnection, id: i32) -> Result<external::Speaker> {
    let speaker = read(db, id).await?;
    let bio = speaker.find_related(bios::Entity).one(db).await?;
    Ok(speaker.to_external(bio.as_ref()))
}

pub async fn list(db: &DatabaseConnection) -> Result<Vec<speakers::Model>> {
    Ok(speakers::Entity::find()
        .order_by_asc(speakers::Column::Id)
        .all(db)
        .await?)
}

pub async fn list_external(db: &DatabaseConnection) -> Result<Vec<external::Speaker>> {
    let rows = speakers::Entity::find()
        .find_also_related(bios::Entity)
        .order_by_asc(speakers::Column::Id)
        .all(db)
        .await?;

    Ok(rows
        .iter()
        .map(|(speaker, bio)| speaker.to_external(bio.as_ref()))
        .collect())
}

async fn update_in<C: ConnectionTrait>(
    txn: &C,
    id: i32,
    attrs: SpeakerAttributes,
) -> Result<speakers::Model> {
    let existing = speakers::Entity::find_by_id(id)
        .one(txn)
        .await?
        .ok_or_else(|| ModelError::not_found("speaker", id))?;

    let Some(name) = attrs.name else {
        return Ok(existing);
    };
    let mut speaker: speakers::ActiveModel = existing.into();
    speaker.name = Set(name);
    Ok(speaker.update(txn).await?)
}

pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    attrs: SpeakerAttributes,
) -> Result<speakers::Model> {
    let txn = db.begin().await?;
    let speaker = update_in(&txn, id, attrs).await?;
    txn.commit().await?;
    Ok(speaker)
}

/// Updates the speaker and returns it with its bio inlined, read in the
/// same transaction.
pub async fn update_external(
    db: &DatabaseConnection,
    id: i32,
    attrs: SpeakerAttributes,
) -> Result<external::Speaker> {
    let txn = db.begin().await?;
    let speaker = update_in(&txn, id, attrs).await?;
    let bio = speaker.find_related(bios::Entity).one(&txn).await?;
    txn.commit().await?;
    Ok(speaker.to_external(bio.as_ref()))
}

/// Deletes the speaker, its bio and its session links. Sessions are left in place.
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<()> {
    let txn = db.begin().await?;
    let speaker = speakers::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ModelError::not_found("speaker", id))?;

    helpers::cascade_speaker(&txn, id).await?;
    speakers::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    info!("Deleted {speaker}");
    Ok(())
}
