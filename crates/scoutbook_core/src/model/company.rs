//! Company entity model.
//!
//! # Invariants
//! - `linkedin_url` identifies at most one company.
//! - Partial updates only touch the allow-listed columns of `CompanyPatch`.

use super::{deserialize_present, require_text, ValidationError};
use serde::{Deserialize, Serialize};

/// Storage-assigned company identifier.
pub type CompanyId = i64;

const ENTITY: &str = "company";

/// One stored row of the `companies` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub industry: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    /// Source record URL; unique across all companies.
    pub linkedin_url: String,
    pub profile_pic: Option<String>,
    pub about: Option<String>,
    pub notes: Option<String>,
    /// Free-form timestamp supplied by the client that saved the record.
    pub date_saved: Option<String>,
}

impl Company {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text(ENTITY, "name", &self.name)?;
        require_text(ENTITY, "linkedin_url", &self.linkedin_url)?;
        Ok(())
    }
}

/// Input for creating a company. Every column except `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCompany {
    pub name: String,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    pub linkedin_url: String,
    #[serde(default)]
    pub profile_pic: Option<String>,
    #[serde(default)]
    pub about: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub date_saved: Option<String>,
}

impl NewCompany {
    /// Builds an input with only the required fields set.
    pub fn new(name: impl Into<String>, linkedin_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            industry: None,
            location: None,
            website: None,
            linkedin_url: linkedin_url.into(),
            profile_pic: None,
            about: None,
            notes: None,
            date_saved: None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text(ENTITY, "name", &self.name)?;
        require_text(ENTITY, "linkedin_url", &self.linkedin_url)?;
        Ok(())
    }
}

/// Allow-listed partial update for a company.
///
/// Every slot is a nested option: absent keeps the value, `null` clears it.
/// Required columns reject `null` in `validate`.
/// Keys outside this list are rejected at deserialization time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompanyPatch {
    #[serde(default, deserialize_with = "deserialize_present")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub linkedin_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub industry: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub website: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub profile_pic: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub about: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub date_saved: Option<Option<String>>,
}

impl CompanyPatch {
    /// Returns whether the patch carries no field at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Checks the required columns that the patch would overwrite.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_present(ENTITY, "name", &self.name)?;
        require_present(ENTITY, "linkedin_url", &self.linkedin_url)?;
        Ok(())
    }

    /// Writes every present field onto `company`, leaving the rest untouched.
    pub fn apply_to(&self, company: &mut Company) {
        if let Some(Some(name)) = &self.name {
            company.name.clone_from(name);
        }
        if let Some(Some(linkedin_url)) = &self.linkedin_url {
            company.linkedin_url.clone_from(linkedin_url);
        }
        overwrite(&mut company.industry, &self.industry);
        overwrite(&mut company.location, &self.location);
        overwrite(&mut company.website, &self.website);
        overwrite(&mut company.profile_pic, &self.profile_pic);
        overwrite(&mut company.about, &self.about);
        overwrite(&mut company.notes, &self.notes);
        overwrite(&mut company.date_saved, &self.date_saved);
    }
}

fn require_present(
    entity: &'static str,
    field: &'static str,
    update: &Option<Option<String>>,
) -> Result<(), ValidationError> {
    match update {
        None => Ok(()),
        Some(None) => Err(ValidationError::NullField { entity, field }),
        Some(Some(value)) => require_text(entity, field, value),
    }
}

fn overwrite(slot: &mut Option<String>, update: &Option<Option<String>>) {
    if let Some(value) = update {
        slot.clone_from(value);
    }
}
