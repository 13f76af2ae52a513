use sea_orm::entity::prelude::*;
use std::fmt;

use super::external;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "sessions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    // naive, rendered without an offset
    pub start_time: Option<DateTime>,
    pub event_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::events::Entity",
        from = "Column::EventId",
        to = "super::events::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Event,
    #[sea_orm(has_many = "super::session_speakers::Entity")]
    SessionSpeakers,
}

impl Related<super::events::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Event.def()
    }
}

impl Related<super::session_speakers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SessionSpeakers.def()
    }
}

impl Related<super::speakers::Entity> for Entity {
    fn to() -> RelationDef {
        super::session_speakers::Relation::Speaker.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::session_speakers::Relation::Session.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// External form of a session. Linked speakers are an association and
    /// are not part of it; fetch them with `speakers_of_session`.
    pub fn to_external(&self) -> external::Session {
        external::Session {
            id: self.id,
            title: self.title.clone(),
            start_time: self.start_time.as_ref().map(external::iso_8601),
            event_id: self.event_id,
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.start_time {
            Some(start) => write!(f, "<Session {}, {}, {}>", self.id, self.title, start),
            None => write!(f, "<Session {}, {}, None>", self.id, self.title),
        }
    }
}
