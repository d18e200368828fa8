//! Profile repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide single-row CRUD over the `profiles` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Lists are ordered by `id ASC`.
//! - Read paths reject rows that fail `Profile::validate()`.

use super::{map_unique_violation, RepoError, RepoResult};
use crate::model::profile::{NewProfile, Profile, ProfileId};
use rusqlite::{params, Connection, OptionalExtension, Row};

const ENTITY: &str = "profile";

const PROFILE_SELECT_SQL: &str = "SELECT
    id,
    name,
    headline,
    url,
    current_title,
    location,
    profile_pic,
    about,
    notes
FROM profiles";

/// Repository interface for profile persistence.
pub trait ProfileRepository {
    fn create_profile(&self, input: &NewProfile) -> RepoResult<ProfileId>;
    fn get_profile(&self, id: ProfileId) -> RepoResult<Option<Profile>>;
    fn get_profile_by_url(&self, url: &str) -> RepoResult<Option<Profile>>;
    fn list_profiles(&self) -> RepoResult<Vec<Profile>>;
    fn update_profile_notes(&self, id: ProfileId, notes: Option<&str>) -> RepoResult<()>;
    fn delete_profile(&self, id: ProfileId) -> RepoResult<()>;
    /// Removes every profile row and returns how many were deleted.
    fn delete_all_profiles(&self) -> RepoResult<usize>;
}

/// SQLite-backed profile repository.
pub struct SqliteProfileRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProfileRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ProfileRepository for SqliteProfileRepository<'_> {
    fn create_profile(&self, input: &NewProfile) -> RepoResult<ProfileId> {
        input.validate()?;

        self.conn
            .execute(
                "INSERT INTO profiles (
                    name,
                    headline,
                    url,
                    current_title,
                    location,
                    profile_pic,
                    about,
                    notes
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
                params![
                    input.name.as_str(),
                    input.headline.as_str(),
                    input.url.as_str(),
                    input.current_title.as_str(),
                    input.location.as_str(),
                    input.profile_pic.as_deref(),
                    input.about.as_deref(),
                    input.notes.as_deref(),
                ],
            )
            .map_err(|err| map_unique_violation(err, ENTITY, "url", &input.url))?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_profile(&self, id: ProfileId) -> RepoResult<Option<Profile>> {
        let row = self
            .conn
            .query_row(
                &format!("{PROFILE_SELECT_SQL} WHERE id = ?1;"),
                [id],
                read_profile_row,
            )
            .optional()?;
        row.map(checked).transpose()
    }

    fn get_profile_by_url(&self, url: &str) -> RepoResult<Option<Profile>> {
        let row = self
            .conn
            .query_row(
                &format!("{PROFILE_SELECT_SQL} WHERE url = ?1;"),
                [url],
                read_profile_row,
            )
            .optional()?;
        row.map(checked).transpose()
    }

    fn list_profiles(&self) -> RepoResult<Vec<Profile>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROFILE_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut profiles = Vec::new();

        while let Some(row) = rows.next()? {
            profiles.push(checked(read_profile_row(row)?)?);
        }

        Ok(profiles)
    }

    fn update_profile_notes(&self, id: ProfileId, notes: Option<&str>) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE profiles SET notes = ?1 WHERE id = ?2;",
            params![notes, id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound { entity: ENTITY, id });
        }

        Ok(())
    }

    fn delete_profile(&self, id: ProfileId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM profiles WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound { entity: ENTITY, id });
        }

        Ok(())
    }

    fn delete_all_profiles(&self) -> RepoResult<usize> {
        Ok(self.conn.execute("DELETE FROM profiles;", [])?)
    }
}

fn read_profile_row(row: &Row<'_>) -> rusqlite::Result<Profile> {
    Ok(Profile {
        id: row.get("id")?,
        name: row.get("name")?,
        headline: row.get("headline")?,
        url: row.get("url")?,
        current_title: row.get("current_title")?,
        location: row.get("location")?,
        profile_pic: row.get("profile_pic")?,
        about: row.get("about")?,
        notes: row.get("notes")?,
    })
}

fn checked(profile: Profile) -> RepoResult<Profile> {
    profile.validate().map_err(|err| {
        RepoError::InvalidData(format!("profiles row {}: {err}", profile.id))
    })?;
    Ok(profile)
}
