//! Core storage and data access for scoutbook.
//! This crate is the single source of truth for profile/company invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{DbError, DbResult, Store};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::company::{Company, CompanyId, CompanyPatch, NewCompany};
pub use model::profile::{NewProfile, Profile, ProfileId, ProfileNotesUpdate};
pub use model::ValidationError;
pub use repo::company_repo::{CompanyRepository, SqliteCompanyRepository};
pub use repo::profile_repo::{ProfileRepository, SqliteProfileRepository};
pub use repo::{RepoError, RepoResult};
pub use service::company_service::CompanyService;
pub use service::profile_service::{demo_profiles, ProfileService};
pub use service::{ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
