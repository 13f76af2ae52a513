use chrono::NaiveDateTime;
use log::{debug, info};
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryOrder, Set,
    TransactionTrait,
};
use serde::{Deserialize, Deserializer};

use super::required;
use crate::entity::{events, helpers, sessions};
use crate::error::{ModelError, Result};

#[derive(Debug, Default, Clone, Deserialize)]
pub struct SessionAttributes {
    pub title: Option<String>,
    /// Outer `None` leaves the value alone; `Some(None)` clears it.
    #[serde(default, deserialize_with = "present")]
    pub start_time: Option<Option<NaiveDateTime>>,
    pub event_id: Option<i32>,
}

// An explicit `null` must survive as `Some(None)`.
fn present<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

async fn ensure_event<C: ConnectionTrait>(db: &C, event_id: i32) -> Result<()> {
    match events::Entity::find_by_id(event_id).one(db).await? {
        Some(_) => Ok(()),
        None => Err(ModelError::validation(format!(
            "event_id {event_id} does not reference an existing event"
        ))),
    }
}

pub async fn create(
    db: &DatabaseConnection,
    attrs: SessionAttributes,
) -> Result<sessions::Model> {
    let title = required(attrs.title, "title")?;
    let event_id = required(attrs.event_id, "event_id")?;

    let txn = db.begin().await?;
    ensure_event(&txn, event_id).await?;

    let session = sessions::ActiveModel {
        title: Set(title),
        start_time: Set(attrs.start_time.flatten()),
        event_id: Set(event_id),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    debug!("Created {session} under event {event_id}");
    Ok(session)
}

pub async fn read(db: &DatabaseConnection, id: i32) -> Result<sessions::Model> {
    sessions::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ModelError::not_found("session", id))
}

pub async fn list(db: &DatabaseConnection) -> Result<Vec<sessions::Model>> {
    Ok(sessions::Entity::find()
        .order_by_asc(sessions::Column::Id)
        .all(db)
        .await?)
}

pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    attrs: SessionAttributes,
) -> Result<sessions::Model> {
    let txn = db.begin().await?;
    let existing = sessions::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ModelError::not_found("session", id))?;

    let mut session: sessions::ActiveModel = existing.clone().into();
    if let Some(title) = attrs.title {
        session.title = Set(title);
    }
    if let Some(start_time) = attrs.start_time {
        session.start_time = Set(start_time);
    }
    if let Some(event_id) = attrs.event_id {
        ensure_event(&txn, event_id).await?;
        session.event_id = Set(event_id);
    }
    if !session.is_changed() {
        return Ok(existing);
    }

    let session = session.update(&txn).await?;
    txn.commit().await?;
    Ok(session)
}

/// Deletes the session and its speaker links. Speakers are left in place.
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<()> {
    let txn = db.begin().await?;
    let session = sessions::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ModelError::not_found("session", id))?;

    helpers::cascade_session(&txn, id).await?;
    sessions::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    info!("Deleted {session}");
    Ok(())
}
