//! Company repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide single-row CRUD over the `companies` table.
//!
//! # Invariants
//! - Lists are ordered by `id ASC`.
//! - `update_company` writes the full row; callers merge partial input first.

use super::{map_unique_violation, RepoError, RepoResult};
use crate::model::company::{Company, CompanyId, NewCompany};
use rusqlite::{params, Connection, OptionalExtension, Row};

const ENTITY: &str = "company";

const COMPANY_SELECT_SQL: &str = "SELECT
    id,
    name,
    industry,
    location,
    website,
    linkedin_url,
    profile_pic,
    about,
    notes,
    date_saved
FROM companies";

/// Repository interface for company persistence.
pub trait CompanyRepository {
    fn create_company(&self, input: &NewCompany) -> RepoResult<CompanyId>;
    fn get_company(&self, id: CompanyId) -> RepoResult<Option<Company>>;
    fn get_company_by_linkedin_url(&self, linkedin_url: &str) -> RepoResult<Option<Company>>;
    fn list_companies(&self) -> RepoResult<Vec<Company>>;
    fn update_company(&self, company: &Company) -> RepoResult<()>;
    fn delete_company(&self, id: CompanyId) -> RepoResult<()>;
    fn delete_all_companies(&self) -> RepoResult<usize>;
}

/// SQLite-backed company repository.
pub struct SqliteCompanyRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCompanyRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CompanyRepository for SqliteCompanyRepository<'_> {
    fn create_company(&self, input: &NewCompany) -> RepoResult<CompanyId> {
        input.validate()?;

        self.conn
            .execute(
                "INSERT INTO companies (
                    name,
                    industry,
                    location,
                    website,
                    linkedin_url,
                    profile_pic,
                    about,
                    notes,
                    date_saved
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
                params![
                    input.name.as_str(),
                    input.industry.as_deref(),
                    input.location.as_deref(),
                    input.website.as_deref(),
                    input.linkedin_url.as_str(),
                    input.profile_pic.as_deref(),
                    input.about.as_deref(),
                    input.notes.as_deref(),
                    input.date_saved.as_deref(),
                ],
            )
            .map_err(|err| {
                map_unique_violation(err, ENTITY, "linkedin_url", &input.linkedin_url)
            })?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_company(&self, id: CompanyId) -> RepoResult<Option<Company>> {
        let row = self
            .conn
            .query_row(
                &format!("{COMPANY_SELECT_SQL} WHERE id = ?1;"),
                [id],
                read_company_row,
            )
            .optional()?;
        row.map(checked).transpose()
    }

    fn get_company_by_linkedin_url(&self, linkedin_url: &str) -> RepoResult<Option<Company>> {
        let row = self
            .conn
            .query_row(
                &format!("{COMPANY_SELECT_SQL} WHERE linkedin_url = ?1;"),
                [linkedin_url],
                read_company_row,
            )
            .optional()?;
        row.map(checked).transpose()
    }

    fn list_companies(&self) -> RepoResult<Vec<Company>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{COMPANY_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut companies = Vec::new();

        while let Some(row) = rows.next()? {
            companies.push(checked(read_company_row(row)?)?);
        }

        Ok(companies)
    }

    fn update_company(&self, company: &Company) -> RepoResult<()> {
        company.validate()?;

        let changed = self
            .conn
            .execute(
                "UPDATE companies
                 SET
                    name = ?1,
                    industry = ?2,
                    location = ?3,
                    website = ?4,
                    linkedin_url = ?5,
                    profile_pic = ?6,
                    about = ?7,
                    notes = ?8,
                    date_saved = ?9
                 WHERE id = ?10;",
                params![
                    company.name.as_str(),
                    company.industry.as_deref(),
                    company.location.as_deref(),
                    company.website.as_deref(),
                    company.linkedin_url.as_str(),
                    company.profile_pic.as_deref(),
                    company.about.as_deref(),
                    company.notes.as_deref(),
                    company.date_saved.as_deref(),
                    company.id,
                ],
            )
            .map_err(|err| {
                map_unique_violation(err, ENTITY, "linkedin_url", &company.linkedin_url)
            })?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: ENTITY,
                id: company.id,
            });
        }

        Ok(())
    }

    fn delete_company(&self, id: CompanyId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM companies WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound { entity: ENTITY, id });
        }

        Ok(())
    }

    fn delete_all_companies(&self) -> RepoResult<usize> {
        Ok(self.conn.execute("DELETE FROM companies;", [])?)
    }
}

fn read_company_row(row: &Row<'_>) -> rusqlite::Result<Company> {
    Ok(Company {
        id: row.get("id")?,
        name: row.get("name")?,
        industry: row.get("industry")?,
        location: row.get("location")?,
        website: row.get("website")?,
        linkedin_url: row.get("linkedin_url")?,
        profile_pic: row.get("profile_pic")?,
        about: row.get("about")?,
        notes: row.get("notes")?,
        date_saved: row.get("date_saved")?,
    })
}

fn checked(company: Company) -> RepoResult<Company> {
    company.validate().map_err(|err| {
        RepoError::InvalidData(format!("companies row {}: {err}", company.id))
    })?;
    Ok(company)
}
