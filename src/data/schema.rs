//! Table definitions for the persisted schema.
//!
//! Foreign keys are named `fk_<table>_<column>_<referenced_table>` so that
//! migration tooling sees stable constraint names.

use sea_orm::sea_query::{ColumnDef, ForeignKey, ForeignKeyAction, Index, Table};
use sea_orm::{ConnectionTrait, DbErr, EntityName, IdenStatic, sea_query::TableCreateStatement};

use crate::entity::{bios, events, session_speakers, sessions, speakers};

pub fn fk_name(table: &str, column: &str, referenced_table: &str) -> String {
    format!("fk_{table}_{column}_{referenced_table}")
}

/// `CREATE TABLE IF NOT EXISTS` for every table, parents first.
pub fn statements() -> Vec<TableCreateStatement> {
    vec![
        Table::create()
            .table(events::Entity)
            .if_not_exists()
            .col(
                ColumnDef::new(events::Column::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(ColumnDef::new(events::Column::Name).string().not_null())
            .col(ColumnDef::new(events::Column::Location).string().not_null())
            .to_owned(),
        Table::create()
            .table(sessions::Entity)
            .if_not_exists()
            .col(
                ColumnDef::new(sessions::Column::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(ColumnDef::new(sessions::Column::Title).string().not_null())
            .col(ColumnDef::new(sessions::Column::StartTime).date_time().null())
            .col(ColumnDef::new(sessions::Column::EventId).integer().not_null())
            .foreign_key(
                ForeignKey::create()
                    .name(fk_name(
                        sessions::Entity.table_name(),
                        sessions::Column::EventId.as_str(),
                        events::Entity.table_name(),
                    ))
                    .from(sessions::Entity, sessions::Column::EventId)
                    .to(events::Entity, events::Column::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .to_owned(),
        Table::create()
            .table(speakers::Entity)
            .if_not_exists()
            .col(
                ColumnDef::new(speakers::Column::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(ColumnDef::new(speakers::Column::Name).string().not_null())
            .to_owned(),
        Table::create()
            .table(bios::Entity)
            .if_not_exists()
            .col(
                ColumnDef::new(bios::Column::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(ColumnDef::new(bios::Column::BioText).text().not_null())
            .col(
                ColumnDef::new(bios::Column::SpeakerId)
                    .integer()
                    .not_null()
                    .unique_key(),
            )
            .foreign_key(
                ForeignKey::create()
                    .name(fk_name(
                        bios::Entity.table_name(),
                        bios::Column::SpeakerId.as_str(),
                        speakers::Entity.table_name(),
                    ))
                    .from(bios::Entity, bios::Column::SpeakerId)
                    .to(speakers::Entity, speakers::Column::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .to_owned(),
        Table::create()
            .table(session_speakers::Entity)
            .if_not_exists()
            .col(
                ColumnDef::new(session_speakers::Column::SessionId)
                    .integer()
                    .not_null(),
            )
            .col(
                ColumnDef::new(session_speakers::Column::SpeakerId)
                    .integer()
                    .not_null(),
            )
            .primary_key(
                Index::create()
                    .col(session_speakers::Column::SessionId)
                    .col(session_speakers::Column::SpeakerId),
            )
            .foreign_key(
                ForeignKey::create()
                    .name(fk_name(
                        session_speakers::Entity.table_name(),
                        session_speakers::Column::SessionId.as_str(),
                        sessions::Entity.table_name(),
                    ))
                    .from(session_speakers::Entity, session_speakers::Column::SessionId)
                    .to(sessions::Entity, sessions::Column::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .foreign_key(
                ForeignKey::create()
                    .name(fk_name(
                        session_speakers::Entity.table_name(),
                        session_speakers::Column::SpeakerId.as_str(),
                        speakers::Entity.table_name(),
                    ))
                    .from(session_speakers::Entity, session_speakers::Column::SpeakerId)
                    .to(speakers::Entity, speakers::Column::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .to_owned(),
    ]
}

pub async fn create_all<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    for stmt in statements() {
        db.execute(backend.build(&stmt)).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::sea_query::SqliteQueryBuilder;

    fn rendered() -> String {
        statements()
            .iter()
            .map(|s| s.to_string(SqliteQueryBuilder))
            .collect::<Vec<_>>()
            .join(";\n")
    }

    #[test]
    fn foreign_keys_are_named_deterministically() {
        let sql = rendered();
        for name in [
            "fk_sessions_event_id_events",
            "fk_bios_speaker_id_speakers",
            "fk_session_speakers_session_id_sessions",
            "fk_session_speakers_speaker_id_speakers",
        ] {
            assert!(sql.contains(&format!("\"{name}\"")), "missing {name} in {sql}");
        }
    }

    #[test]
    fn parents_are_created_before_children() {
        let sql = rendered();
        let pos = |table: &str| sql.find(&format!("CREATE TABLE IF NOT EXISTS \"{table}\"")).unwrap();
        assert!(pos("events") < pos("sessions"));
        assert!(pos("speakers") < pos("bios"));
        assert!(pos("sessions") < pos("session_speakers"));
    }
}
