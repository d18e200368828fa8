//! Profile entity model.
//!
//! # Invariants
//! - `url` identifies at most one profile.
//! - `notes` is the only field that changes after creation.

use super::{deserialize_present, require_text, ValidationError};
use serde::{Deserialize, Serialize};

/// Storage-assigned profile identifier.
pub type ProfileId = i64;

const ENTITY: &str = "profile";

/// One stored row of the `profiles` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    pub name: String,
    pub headline: String,
    /// Source record URL; unique across all profiles.
    pub url: String,
    pub current_title: String,
    pub location: String,
    pub profile_pic: Option<String>,
    pub about: Option<String>,
    pub notes: Option<String>,
}

impl Profile {
    /// Checks required text fields of a row read from storage.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_required(
            &self.name,
            &self.headline,
            &self.url,
            &self.current_title,
            &self.location,
        )
    }
}

/// Input for creating a profile. Every column except `id`.
///
/// Unknown keys are ignored so scrapers may post extra metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProfile {
    pub name: String,
    pub headline: String,
    pub url: String,
    pub current_title: String,
    pub location: String,
    #[serde(default)]
    pub profile_pic: Option<String>,
    #[serde(default)]
    pub about: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewProfile {
    /// Builds an input with only the required fields set.
    pub fn new(
        name: impl Into<String>,
        headline: impl Into<String>,
        url: impl Into<String>,
        current_title: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            headline: headline.into(),
            url: url.into(),
            current_title: current_title.into(),
            location: location.into(),
            profile_pic: None,
            about: None,
            notes: None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_required(
            &self.name,
            &self.headline,
            &self.url,
            &self.current_title,
            &self.location,
        )
    }
}

/// Partial update for the mutable part of a profile.
///
/// `notes` absent leaves the value unchanged, `null` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileNotesUpdate {
    #[serde(default, deserialize_with = "deserialize_present")]
    pub notes: Option<Option<String>>,
}

impl ProfileNotesUpdate {
    /// Update that replaces `notes` with `value`.
    pub fn set(value: impl Into<String>) -> Self {
        Self {
            notes: Some(Some(value.into())),
        }
    }

    /// Update that clears `notes`.
    pub fn clear() -> Self {
        Self { notes: Some(None) }
    }
}

fn validate_required(
    name: &str,
    headline: &str,
    url: &str,
    current_title: &str,
    location: &str,
) -> Result<(), ValidationError> {
    require_text(ENTITY, "name", name)?;
    require_text(ENTITY, "headline", headline)?;
    require_text(ENTITY, "url", url)?;
    require_text(ENTITY, "current_title", current_title)?;
    require_text(ENTITY, "location", location)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{NewProfile, ProfileNotesUpdate};
    use crate::model::ValidationError;

    #[test]
    fn new_profile_rejects_blank_url() {
        let input = NewProfile::new("Jane Doe", "PM", "   ", "PM", "SF");
        assert_eq!(
            input.validate(),
            Err(ValidationError::BlankField {
                entity: "profile",
                field: "url",
            })
        );
    }

    #[test]
    fn notes_update_distinguishes_absent_null_and_value() {
        let absent: ProfileNotesUpdate = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.notes, None);

        let cleared: ProfileNotesUpdate = serde_json::from_str(r#"{"notes":null}"#).unwrap();
        assert_eq!(cleared, ProfileNotesUpdate::clear());

        let set: ProfileNotesUpdate = serde_json::from_str(r#"{"notes":"met at expo"}"#).unwrap();
        assert_eq!(set, ProfileNotesUpdate::set("met at expo"));
    }

    #[test]
    fn notes_update_rejects_other_fields() {
        let result = serde_json::from_str::<ProfileNotesUpdate>(r#"{"name":"Mallory"}"#);
        assert!(result.is_err());
    }
}
