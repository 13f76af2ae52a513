use sea_orm::entity::prelude::*;
use std::fmt;

use super::external;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "speakers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::bios::Entity")]
    Bio,
    #[sea_orm(has_many = "super::session_speakers::Entity")]
    SessionSpeakers,
}

impl Related<super::bios::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bio.def()
    }
}

impl Related<super::session_speakers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SessionSpeakers.def()
    }
}

impl Related<super::sessions::Entity> for Entity {
    fn to() -> RelationDef {
        super::session_speakers::Relation::Session.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::session_speakers::Relation::Speaker.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// The bio is owned by the speaker, so it is inlined rather than referenced.
    pub fn to_external(&self, bio: Option<&super::bios::Model>) -> external::Speaker {
        external::Speaker {
            id: self.id,
            name: self.name.clone(),
            bio: bio.map(super::bios::Model::to_external),
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Speaker {}, {}>", self.id, self.name)
    }
}
