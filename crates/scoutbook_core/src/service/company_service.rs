//! Company use-case service.
//!
//! # Responsibility
//! - Provide get/list/create/update/delete for companies, returning entities.
//!
//! # Invariants
//! - Partial updates merge the allow-listed `CompanyPatch` onto the stored row
//!   inside the caller's unit of work, then write the merged row back.

use super::{ServiceError, ServiceResult};
use crate::model::company::{Company, CompanyId, CompanyPatch, NewCompany};
use crate::repo::company_repo::CompanyRepository;
use log::info;

const ENTITY: &str = "company";

/// Company service facade over repository implementations.
pub struct CompanyService<R: CompanyRepository> {
    repo: R,
}

impl<R: CompanyRepository> CompanyService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn get_company(&self, id: CompanyId) -> ServiceResult<Option<Company>> {
        Ok(self.repo.get_company(id)?)
    }

    pub fn get_company_by_linkedin_url(
        &self,
        linkedin_url: &str,
    ) -> ServiceResult<Option<Company>> {
        Ok(self.repo.get_company_by_linkedin_url(linkedin_url)?)
    }

    pub fn list_companies(&self) -> ServiceResult<Vec<Company>> {
        Ok(self.repo.list_companies()?)
    }

    /// Creates one company; `Conflict` when `linkedin_url` is taken.
    pub fn create_company(&self, input: &NewCompany) -> ServiceResult<Company> {
        let id = self.repo.create_company(input)?;
        self.repo
            .get_company(id)?
            .ok_or(ServiceError::InconsistentState(
                "created company not found in read-back",
            ))
    }

    /// Overwrites only the fields present in `patch`.
    pub fn update_company(&self, id: CompanyId, patch: &CompanyPatch) -> ServiceResult<Company> {
        patch.validate()?;

        let mut company = self
            .repo
            .get_company(id)?
            .ok_or(ServiceError::NotFound { entity: ENTITY, id })?;
        if patch.is_empty() {
            return Ok(company);
        }

        patch.apply_to(&mut company);
        self.repo.update_company(&company)?;
        self.repo
            .get_company(id)?
            .ok_or(ServiceError::InconsistentState(
                "updated company not found in read-back",
            ))
    }

    /// Deletes one company and returns its prior state.
    pub fn delete_company(&self, id: CompanyId) -> ServiceResult<Company> {
        let existing = self
            .repo
            .get_company(id)?
            .ok_or(ServiceError::NotFound { entity: ENTITY, id })?;
        self.repo.delete_company(id)?;
        Ok(existing)
    }

    pub fn truncate_companies(&self) -> ServiceResult<usize> {
        let removed = self.repo.delete_all_companies()?;
        info!("event=companies_truncate module=service status=ok removed={removed}");
        Ok(removed)
    }
}
