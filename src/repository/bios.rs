use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::Deserialize;

use super::required;
use crate::entity::{bios, speakers};
use crate::error::{ModelError, Result};

#[derive(Debug, Default, Clone, Deserialize)]
pub struct BioAttributes {
    pub bio_text: Option<String>,
    pub speaker_id: Option<i32>,
}

/// The speaker must exist and must not already own a bio other than `except`.
async fn ensure_free_speaker<C: ConnectionTrait>(
    db: &C,
    speaker_id: i32,
    except: Option<i32>,
) -> Result<()> {
    if speakers::Entity::find_by_id(speaker_id).one(db).await?.is_none() {
        return Err(ModelError::validation(format!(
            "speaker_id {speaker_id} does not reference an existing speaker"
        )));
    }

    let owned = bios::Entity::find()
        .filter(bios::Column::SpeakerId.eq(speaker_id))
        .one(db)
        .await?;
    match owned {
        Some(bio) if Some(bio.id) != except => Err(ModelError::integrity(format!(
            "speaker {speaker_id} already has bio {}",
            bio.id
        ))),
        _ => Ok(()),
    }
}

pub async fn create(db: &DatabaseConnection, attrs: BioAttributes) -> Result<bios::Model> {
    let bio_text = required(attrs.bio_text, "bio_text")?;
    let speaker_id = required(attrs.speaker_id, "speaker_id")?;

    let txn = db.begin().await?;
    ensure_free_speaker(&txn, speaker_id, None).await?;

    let bio = bios::ActiveModel {
        bio_text: Set(bio_text),
        speaker_id: Set(speaker_id),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    debug!("Created bio {} for speaker {speaker_id}", bio.id);
    Ok(bio)
}

pub async fn read(db: &DatabaseConnection, id: i32) -> Result<bios::Model> {
    bios::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ModelError::not_found("bio", id))
}

pub async fn list(db: &DatabaseConnection) -> Result<Vec<bios::Model>> {
    Ok(bios::Entity::find()
        .order_by_asc(bios::Column::Id)
        .all(db)
        .await?)
}

pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    attrs: BioAttributes,
) -> Result<bios::Model> {
    let txn = db.begin().await?;
    let existing = bios::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ModelError::not_found("bio", id))?;

    let mut bio: bios::ActiveModel = existing.clone().into();
    if let Some(bio_text) = attrs.bio_text {
        bio.bio_text = Set(bio_text);
    }
    if let Some(speaker_id) = attrs.speaker_id {
        ensure_free_speaker(&txn, speaker_id, Some(id)).await?;
        bio.speaker_id = Set(speaker_id);
    }
    if !bio.is_changed() {
        return Ok(existing);
    }

    let bio = bio.update(&txn).await?;
    txn.commit().await?;
    Ok(bio)
}

pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<()> {
    let txn = db.begin().await?;
    let removed = bios::Entity::delete_by_id(id).exec(&txn).await?;
    if removed.rows_affected == 0 {
        return Err(ModelError::not_found("bio", id));
    }
    txn.commit().await?;

    debug!("Deleted bio {id}");
    Ok(())
}
