//! Entity model for stored profile and company rows.
//!
//! # Responsibility
//! - Define the in-process shape of each stored row.
//! - Define explicit input structs for creates and partial updates.
//! - Keep presence checks for required text fields in one place.
//!
//! # Invariants
//! - Entity ids are assigned by storage and never change.
//! - Required text fields are non-blank on every persisted row.

use serde::{Deserialize, Deserializer};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod company;
pub mod profile;

/// Presence-check failure for a required text field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    BlankField {
        entity: &'static str,
        field: &'static str,
    },
    NullField {
        entity: &'static str,
        field: &'static str,
    },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField { entity, field } => {
                write!(f, "{entity}.{field} must not be blank")
            }
            Self::NullField { entity, field } => {
                write!(f, "{entity}.{field} must not be null")
            }
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn require_text(
    entity: &'static str,
    field: &'static str,
    value: &str,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::BlankField { entity, field });
    }
    Ok(())
}

/// Deserializes a present JSON key into `Some(value)`, keeping `null` as
/// `Some(None)`. Combined with `#[serde(default)]`, an absent key stays `None`.
pub(crate) fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
