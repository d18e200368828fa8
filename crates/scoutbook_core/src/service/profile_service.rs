//! Profile use-case service.
//!
//! # Responsibility
//! - Provide get/list/create/update/delete for profiles, returning entities.
//! - Seed and truncate helpers for local development databases.
//!
//! # Invariants
//! - `notes` is the only field changed after creation.
//! - Delete returns the row as it was before removal.

use super::{ServiceError, ServiceResult};
use crate::model::profile::{NewProfile, Profile, ProfileId, ProfileNotesUpdate};
use crate::repo::profile_repo::ProfileRepository;
use log::info;

const ENTITY: &str = "profile";

/// Profile service facade over repository implementations.
pub struct ProfileService<R: ProfileRepository> {
    repo: R,
}

impl<R: ProfileRepository> ProfileService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn get_profile(&self, id: ProfileId) -> ServiceResult<Option<Profile>> {
        Ok(self.repo.get_profile(id)?)
    }

    pub fn get_profile_by_url(&self, url: &str) -> ServiceResult<Option<Profile>> {
        Ok(self.repo.get_profile_by_url(url)?)
    }

    /// Lists all profiles ordered by `id ASC`.
    pub fn list_profiles(&self) -> ServiceResult<Vec<Profile>> {
        Ok(self.repo.list_profiles()?)
    }

    /// Creates one profile and returns the stored row.
    ///
    /// Fails with `Conflict` when `url` is already taken.
    pub fn create_profile(&self, input: &NewProfile) -> ServiceResult<Profile> {
        let id = self.repo.create_profile(input)?;
        self.repo
            .get_profile(id)?
            .ok_or(ServiceError::InconsistentState(
                "created profile not found in read-back",
            ))
    }

    /// Applies a notes update. An update without `notes` returns the row as is.
    pub fn update_profile_notes(
        &self,
        id: ProfileId,
        update: &ProfileNotesUpdate,
    ) -> ServiceResult<Profile> {
        if let Some(notes) = &update.notes {
            self.repo.update_profile_notes(id, notes.as_deref())?;
        }
        self.repo
            .get_profile(id)?
            .ok_or(ServiceError::NotFound { entity: ENTITY, id })
    }

    /// Deletes one profile and returns its prior state.
    pub fn delete_profile(&self, id: ProfileId) -> ServiceResult<Profile> {
        let existing = self
            .repo
            .get_profile(id)?
            .ok_or(ServiceError::NotFound { entity: ENTITY, id })?;
        self.repo.delete_profile(id)?;
        Ok(existing)
    }

    /// Removes every profile and returns the number of deleted rows.
    pub fn truncate_profiles(&self) -> ServiceResult<usize> {
        let removed = self.repo.delete_all_profiles()?;
        info!("event=profiles_truncate module=service status=ok removed={removed}");
        Ok(removed)
    }

    /// Inserts the demo profiles whose `url` is not stored yet.
    ///
    /// Returns the number of inserted rows; running it twice inserts nothing.
    pub fn seed_demo_profiles(&self) -> ServiceResult<usize> {
        let mut inserted = 0;
        for input in demo_profiles() {
            match self.repo.create_profile(&input) {
                Ok(_) => inserted += 1,
                Err(err) => match ServiceError::from(err) {
                    ServiceError::Conflict { .. } => continue,
                    other => return Err(other),
                },
            }
        }
        info!("event=profiles_seed module=service status=ok inserted={inserted}");
        Ok(inserted)
    }
}

/// Fixed sample rows for local development databases.
pub fn demo_profiles() -> Vec<NewProfile> {
    let mut jane = NewProfile::new(
        "Jane Doe",
        "Product Manager at Example Inc.",
        "https://www.linkedin.com/in/janedoe/",
        "Product Manager",
        "San Francisco, CA",
    );
    jane.profile_pic =
        Some("https://media.licdn.com/dms/image/example/janedoe-200.jpg".to_string());

    let mut john = NewProfile::new(
        "John Smith",
        "Software Engineer at TechCorp",
        "https://www.linkedin.com/in/johnsmith/",
        "Software Engineer",
        "New York, NY",
    );
    john.profile_pic =
        Some("https://media.licdn.com/dms/image/example/johnsmith-200.jpg".to_string());

    vec![jane, john]
}
