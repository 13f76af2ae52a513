use log::{debug, info};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set, TransactionTrait,
};
use serde::Deserialize;

use super::required;
use crate::entity::{events, helpers};
use crate::error::{ModelError, Result};

#[derive(Debug, Default, Clone, Deserialize)]
pub struct EventAttributes {
    pub name: Option<String>,
    pub location: Option<String>,
}

pub async fn create(db: &DatabaseConnection, attrs: EventAttributes) -> Result<events::Model> {
    let event = events::ActiveModel {
        name: Set(required(attrs.name, "name")?),
        location: Set(required(attrs.location, "location")?),
        ..Default::default()
    };

    let txn = db.begin().await?;
    let event = event.insert(&txn).await?;
    txn.commit().await?;

    debug!("Created {event}");
    Ok(event)
}

pub async fn read(db: &DatabaseConnection, id: i32) -> Result<events::Model> {
    events::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ModelError::not_found("event", id))
}

pub async fn list(db: &DatabaseConnection) -> Result<Vec<events::Model>> {
    Ok(events::Entity::find()
        .order_by_asc(events::Column::Id)
        .all(db)
        .await?)
}

pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    attrs: EventAttributes,
) -> Result<events::Model> {
    let txn = db.begin().await?;
    let existing = events::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ModelError::not_found("event", id))?;

    let mut event: events::ActiveModel = existing.clone().into();
    if let Some(name) = attrs.name {
        event.name = Set(name);
    }
    if let Some(location) = attrs.location {
        event.location = Set(location);
    }
    if !event.is_changed() {
        return Ok(existing);
    }

    let event = event.update(&txn).await?;
    txn.commit().await?;
    Ok(event)
}

/// Deletes the event together with its sessions.
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<()> {
    let txn = db.begin().await?;
    let event = events::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ModelError::not_found("event", id))?;

    let sessions = helpers::cascade_event(&txn, id).await?;
    events::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    info!("Deleted {event} and {sessions} sessions");
    Ok(())
}
