//! Company endpoints.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use scoutbook_core::db::Connection;
use scoutbook_core::{
    Company, CompanyId, CompanyPatch, CompanyService, NewCompany, SqliteCompanyRepository,
};
use serde::Deserialize;

const ENTITY: &str = "company";

#[derive(Debug, Deserialize)]
pub struct ByLinkedinUrlParams {
    pub linkedin_url: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/companies", get(list_companies).post(create_company))
        .route("/companies/by_url", get(get_company_by_linkedin_url))
        .route(
            "/companies/{id}",
            get(get_company).patch(update_company).delete(delete_company),
        )
}

fn service(conn: &Connection) -> CompanyService<SqliteCompanyRepository<'_>> {
    CompanyService::new(SqliteCompanyRepository::new(conn))
}

async fn create_company(
    State(state): State<AppState>,
    payload: Result<Json<NewCompany>, JsonRejection>,
) -> Result<(StatusCode, Json<Company>), ApiError> {
    let Json(input) = payload?;
    let company = state
        .unit_of_work("company_create", move |conn| {
            service(conn).create_company(&input)
        })
        .await?;
    Ok((StatusCode::CREATED, Json(company)))
}

async fn list_companies(State(state): State<AppState>) -> Result<Json<Vec<Company>>, ApiError> {
    let companies = state
        .unit_of_work("company_list", |conn| service(conn).list_companies())
        .await?;
    Ok(Json(companies))
}

async fn get_company(
    State(state): State<AppState>,
    id: Result<Path<CompanyId>, PathRejection>,
) -> Result<Json<Company>, ApiError> {
    let Path(id) = id?;
    state
        .unit_of_work("company_get", move |conn| service(conn).get_company(id))
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(ENTITY))
}

async fn get_company_by_linkedin_url(
    State(state): State<AppState>,
    params: Result<Query<ByLinkedinUrlParams>, QueryRejection>,
) -> Result<Json<Company>, ApiError> {
    let Query(ByLinkedinUrlParams { linkedin_url }) = params?;
    state
        .unit_of_work("company_get_by_url", move |conn| {
            service(conn).get_company_by_linkedin_url(&linkedin_url)
        })
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(ENTITY))
}

async fn update_company(
    State(state): State<AppState>,
    id: Result<Path<CompanyId>, PathRejection>,
    payload: Result<Json<CompanyPatch>, JsonRejection>,
) -> Result<Json<Company>, ApiError> {
    let Path(id) = id?;
    let Json(patch) = payload?;
    let company = state
        .unit_of_work("company_update", move |conn| {
            service(conn).update_company(id, &patch)
        })
        .await?;
    Ok(Json(company))
}

async fn delete_company(
    State(state): State<AppState>,
    id: Result<Path<CompanyId>, PathRejection>,
) -> Result<Json<Company>, ApiError> {
    let Path(id) = id?;
    let company = state
        .unit_of_work("company_delete", move |conn| service(conn).delete_company(id))
        .await?;
    Ok(Json(company))
}
