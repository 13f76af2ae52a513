//! Explicit relationship accessors, association links and cascades.
//!
//! Accessors take any connection so they can run on a plain connection or
//! inside a repository transaction.

use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::entity::{bios, events, session_speakers, sessions, speakers};
use crate::error::{ModelError, Result};

pub async fn sessions_of_event<C: ConnectionTrait>(
    db: &C,
    event_id: i32,
) -> Result<Vec<sessions::Model>> {
    let event = events::Entity::find_by_id(event_id)
        .one(db)
        .await?
        .ok_or_else(|| ModelError::not_found("event", event_id))?;

    Ok(event
        .find_related(sessions::Entity)
        .order_by_asc(sessions::Column::Id)
        .all(db)
        .await?)
}

pub async fn event_of_session<C: ConnectionTrait>(
    db: &C,
    session_id: i32,
) -> Result<events::Model> {
    let session = sessions::Entity::find_by_id(session_id)
        .one(db)
        .await?
        .ok_or_else(|| ModelError::not_found("session", session_id))?;

    session
        .find_related(events::Entity)
        .one(db)
        .await?
        .ok_or_else(|| ModelError::not_found("event", session.event_id))
}

pub async fn speakers_of_session<C: ConnectionTrait>(
    db: &C,
    session_id: i32,
) -> Result<Vec<speakers::Model>> {
    if sessions::Entity::find_by_id(session_id).one(db).await?.is_none() {
        return Err(ModelError::not_found("session", session_id));
    }
    // Resolve link rows first, then fetch the speakers by id.
    let speaker_ids: Vec<i32> = session_speakers::Entity::find()
        .filter(session_speakers::Column::SessionId.eq(session_id))
        .all(db)
        .await?
        .into_iter()
        .map(|l| l.speaker_id)
        .collect();

    Ok(speakers::Entity::find()
        .filter(speakers::Column::Id.is_in(speaker_ids))
        .order_by_asc(speakers::Column::Id)
        .all(db)
        .await?)
}

pub async fn sessions_of_speaker<C: ConnectionTrait>(
    db: &C,
    speaker_id: i32,
) -> Result<Vec<sessions::Model>> {
    if speakers::Entity::find_by_id(speaker_id).one(db).await?.is_none() {
        return Err(ModelError::not_found("speaker", speaker_id));
    }
    let session_ids: Vec<i32> = session_speakers::Entity::find()
        .filter(session_speakers::Column::SpeakerId.eq(speaker_id))
        .all(db)
        .await?
        .into_iter()
        .map(|l| l.session_id)
        .collect();

    Ok(sessions::Entity::find()
        .filter(sessions::Column::Id.is_in(session_ids))
        .order_by_asc(sessions::Column::Id)
        .all(db)
        .await?)
}

/// `Ok(None)` when the speaker exists without a bio.
pub async fn bio_of_speaker<C: ConnectionTrait>(
    db: &C,
    speaker_id: i32,
) -> Result<Option<bios::Model>> {
    let speaker = speakers::Entity::find_by_id(speaker_id)
        .one(db)
        .await?
        .ok_or_else(|| ModelError::not_found("speaker", speaker_id))?;

    Ok(speaker.find_related(bios::Entity).one(db).await?)
}

pub async fn link_speaker<C>(db: &C, session_id: i32, speaker_id: i32) -> Result<()>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;

    if sessions::Entity::find_by_id(session_id).one(&txn).await?.is_none() {
        return Err(ModelError::not_found("session", session_id));
    }
    if speakers::Entity::find_by_id(speaker_id).one(&txn).await?.is_none() {
        return Err(ModelError::not_found("speaker", speaker_id));
    }
    if session_speakers::Entity::find_by_id((session_id, speaker_id))
        .one(&txn)
        .await?
        .is_some()
    {
        return Err(ModelError::integrity(format!(
            "speaker {speaker_id} is already linked to session {session_id}"
        )));
    }

    let link = session_speakers::ActiveModel {
        session_id: Set(session_id),
        speaker_id: Set(speaker_id),
    };
    link.insert(&txn).await?;
    txn.commit().await?;

    debug!("Linked speaker {speaker_id} to session {session_id}");
    Ok(())
}

pub async fn unlink_speaker<C>(db: &C, session_id: i32, speaker_id: i32) -> Result<()>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;
    let removed = session_speakers::Entity::delete_by_id((session_id, speaker_id))
        .exec(&txn)
        .await?;
    if removed.rows_affected == 0 {
        return Err(ModelError::not_found(
            "session speaker link",
            format!("{session_id}/{speaker_id}"),
        ));
    }
    txn.commit().await?;

    debug!("Unlinked speaker {speaker_id} from session {session_id}");
    Ok(())
}

/// Removes an event's sessions and their link rows. Returns the number of
/// sessions removed.
pub async fn cascade_event<C: ConnectionTrait>(db: &C, event_id: i32) -> Result<u64> {
    let session_ids: Vec<i32> = sessions::Entity::find()
        .filter(sessions::Column::EventId.eq(event_id))
        .all(db)
        .await?
        .into_iter()
        .map(|s| s.id)
        .collect();

    session_speakers::Entity::delete_many()
        .filter(session_speakers::Column::SessionId.is_in(session_ids))
        .exec(db)
        .await?;
    let removed = sessions::Entity::delete_many()
        .filter(sessions::Column::EventId.eq(event_id))
        .exec(db)
        .await?;

    debug!(
        "Cascaded event {event_id}: removed {} sessions",
        removed.rows_affected
    );
    Ok(removed.rows_affected)
}

pub async fn cascade_session<C: ConnectionTrait>(db: &C, session_id: i32) -> Result<()> {
    let links = session_speakers::Entity::delete_many()
        .filter(session_speakers::Column::SessionId.eq(session_id))
        .exec(db)
        .await?;
    debug!(
        "Cascaded session {session_id}: removed {} speaker links",
        links.rows_affected
    );
    Ok(())
}

/// Removes a speaker's bio and link rows. Linked sessions stay.
pub async fn cascade_speaker<C: ConnectionTrait>(db: &C, speaker_id: i32) -> Result<()> {
    let links = session_speakers::Entity::delete_many()
        .filter(session_speakers::Column::SpeakerId.eq(speaker_id))
        .exec(db)
        .await?;
    let bio = bios::Entity::delete_many()
        .filter(bios::Column::SpeakerId.eq(speaker_id))
        .exec(db)
        .await?;
    debug!(
        "Cascaded speaker {speaker_id}: removed {} speaker links, {} bio",
        links.rows_affected, bio.rows_affected
    );
    Ok(())
}
