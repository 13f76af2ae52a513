use sea_orm::entity::prelude::*;
use std::fmt;

use super::external;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "bios")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub bio_text: String,
    /// At most one bio per speaker.
    #[sea_orm(unique)]
    pub speaker_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::speakers::Entity",
        from = "Column::SpeakerId",
        to = "super::speakers::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Speaker,
}

impl Related<super::speakers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Speaker.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn to_external(&self) -> external::Bio {
        external::Bio {
            id: self.id,
            bio_text: self.bio_text.clone(),
            speaker_id: self.speaker_id,
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Bio {}, {}>", self.id, self.bio_text)
    }
}
