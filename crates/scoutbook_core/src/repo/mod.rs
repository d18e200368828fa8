//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define per-entity data access contracts.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes must run input `validate()` before persistence.
//! - Unique-key collisions surface as `Conflict`, decided by the storage
//!   `UNIQUE` constraint rather than a prior lookup.
//! - Repository APIs return semantic errors (`NotFound`, `Conflict`) in
//!   addition to DB transport errors.

use crate::db::DbError;
use crate::model::ValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod company_repo;
pub mod profile_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by profile and company persistence.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    NotFound {
        entity: &'static str,
        id: i64,
    },
    Conflict {
        entity: &'static str,
        field: &'static str,
        value: String,
    },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::Conflict {
                entity,
                field,
                value,
            } => write!(f, "{entity} with {field} `{value}` already exists"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. } | Self::Conflict { .. } | Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Maps an insert/update failure, turning unique violations into `Conflict`.
pub(crate) fn map_unique_violation(
    err: rusqlite::Error,
    entity: &'static str,
    field: &'static str,
    value: &str,
) -> RepoError {
    let err = DbError::Sqlite(err);
    if err.is_unique_violation() {
        return RepoError::Conflict {
            entity,
            field,
            value: value.to_string(),
        };
    }
    RepoError::Db(err)
}
