use eventboard::data::configuration::Configuration;
use eventboard::data::dbconnector::{DBConnection, SQLConnector};
use eventboard::entity::{events, sessions, speakers};
use eventboard::repository::{self, EventAttributes, SessionAttributes, SpeakerAttributes};
use sea_orm::DatabaseConnection;

pub async fn database() -> DatabaseConnection {
    let mut connector = SQLConnector::in_memory();
    connector.connect().await.unwrap();
    connector
        .initialize(&Configuration::default())
        .await
        .unwrap();
    connector.connection().unwrap().clone()
}

#[allow(dead_code)]
pub async fn event(db: &DatabaseConnection, name: &str) -> events::Model {
    repository::events::create(
        db,
        EventAttributes {
            name: Some(name.into()),
            location: Some("Hall A".into()),
        },
    )
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn session(db: &DatabaseConnection, title: &str, event_id: i32) -> sessions::Model {
    repository::sessions::create(
        db,
        SessionAttributes {
            title: Some(title.into()),
            event_id: Some(event_id),
            ..Default::default()
        },
    )
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn speaker(db: &DatabaseConnection, name: &str) -> speakers::Model {
    repository::speakers::create(
        db,
        SpeakerAttributes {
            name: Some(name.into()),
        },
    )
    .await
    .unwrap()
}
