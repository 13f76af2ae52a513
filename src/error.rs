use sea_orm::{DbErr, SqlErr};
use std::fmt::Display;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("validation error: {message}")]
    Validation { message: String },

    #[error("{entity} {key} not found")]
    NotFound { entity: &'static str, key: String },

    #[error("integrity error: {message}")]
    Integrity { message: String },

    #[error("database error: {0}")]
    Database(DbErr),
}

impl ModelError {
    pub fn validation(message: impl Into<String>) -> Self {
        ModelError::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(entity: &'static str, key: impl Display) -> Self {
        ModelError::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub fn integrity(message: impl Into<String>) -> Self {
        ModelError::Integrity {
            message: message.into(),
        }
    }

    /// Shorthand for a required attribute that was not supplied.
    pub fn missing(field: &str) -> Self {
        ModelError::validation(format!("{field} is required"))
    }
}

// Constraint violations reported by the driver keep their meaning instead of
// collapsing into a generic database error.
impl From<DbErr> for ModelError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(message)) => ModelError::Integrity { message },
            Some(SqlErr::ForeignKeyConstraintViolation(message)) => {
                ModelError::Validation { message }
            }
            _ => ModelError::Database(err),
        }
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_target() {
        assert_eq!(
            ModelError::not_found("event", 7).to_string(),
            "event 7 not found"
        );
        assert_eq!(
            ModelError::missing("title").to_string(),
            "validation error: title is required"
        );
    }

    #[test]
    fn plain_db_errors_stay_database_errors() {
        let err: ModelError = DbErr::Custom("boom".into()).into();
        assert!(matches!(err, ModelError::Database(_)));
    }
}
