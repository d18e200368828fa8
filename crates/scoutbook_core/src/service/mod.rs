//! Core use-case services (the data access operations callers see).
//!
//! # Responsibility
//! - Compose repository calls into entity-returning operations.
//! - Keep HTTP/CLI layers decoupled from storage details.
//! - Translate repository failures into a small error taxonomy.

use crate::db::DbError;
use crate::model::ValidationError;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod company_service;
pub mod profile_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for profile and company use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Input failed presence checks.
    Validation(ValidationError),
    /// Target row does not exist.
    NotFound { entity: &'static str, id: i64 },
    /// Unique key already taken by another row.
    Conflict {
        entity: &'static str,
        field: &'static str,
        value: String,
    },
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::Conflict {
                entity,
                field,
                value,
            } => write!(f, "{entity} with {field} `{value}` already exists"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent state: {details}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::NotFound { entity, id } => Self::NotFound { entity, id },
            RepoError::Conflict {
                entity,
                field,
                value,
            } => Self::Conflict {
                entity,
                field,
                value,
            },
            other => Self::Repo(other),
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for ServiceError {
    fn from(value: DbError) -> Self {
        Self::Repo(RepoError::Db(value))
    }
}
