//! Profile endpoints.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use scoutbook_core::db::Connection;
use scoutbook_core::{
    NewProfile, Profile, ProfileId, ProfileNotesUpdate, ProfileService, SqliteProfileRepository,
};
use serde::Deserialize;

const ENTITY: &str = "profile";

#[derive(Debug, Deserialize)]
pub struct ByUrlParams {
    pub url: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profiles", get(list_profiles).post(create_profile))
        .route("/profiles/by_url", get(get_profile_by_url))
        .route(
            "/profiles/{id}",
            get(get_profile)
                .patch(update_profile_notes)
                .delete(delete_profile),
        )
}

fn service(conn: &Connection) -> ProfileService<SqliteProfileRepository<'_>> {
    ProfileService::new(SqliteProfileRepository::new(conn))
}

async fn create_profile(
    State(state): State<AppState>,
    payload: Result<Json<NewProfile>, JsonRejection>,
) -> Result<(StatusCode, Json<Profile>), ApiError> {
    let Json(input) = payload?;
    let profile = state
        .unit_of_work("profile_create", move |conn| {
            service(conn).create_profile(&input)
        })
        .await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

async fn list_profiles(State(state): State<AppState>) -> Result<Json<Vec<Profile>>, ApiError> {
    let profiles = state
        .unit_of_work("profile_list", |conn| service(conn).list_profiles())
        .await?;
    Ok(Json(profiles))
}

async fn get_profile(
    State(state): State<AppState>,
    id: Result<Path<ProfileId>, PathRejection>,
) -> Result<Json<Profile>, ApiError> {
    let Path(id) = id?;
    state
        .unit_of_work("profile_get", move |conn| service(conn).get_profile(id))
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(ENTITY))
}

async fn get_profile_by_url(
    State(state): State<AppState>,
    params: Result<Query<ByUrlParams>, QueryRejection>,
) -> Result<Json<Profile>, ApiError> {
    let Query(ByUrlParams { url }) = params?;
    state
        .unit_of_work("profile_get_by_url", move |conn| {
            service(conn).get_profile_by_url(&url)
        })
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(ENTITY))
}

async fn update_profile_notes(
    State(state): State<AppState>,
    id: Result<Path<ProfileId>, PathRejection>,
    payload: Result<Json<ProfileNotesUpdate>, JsonRejection>,
) -> Result<Json<Profile>, ApiError> {
    let Path(id) = id?;
    let Json(update) = payload?;
    let profile = state
        .unit_of_work("profile_update_notes", move |conn| {
            service(conn).update_profile_notes(id, &update)
        })
        .await?;
    Ok(Json(profile))
}

async fn delete_profile(
    State(state): State<AppState>,
    id: Result<Path<ProfileId>, PathRejection>,
) -> Result<Json<Profile>, ApiError> {
    let Path(id) = id?;
    let profile = state
        .unit_of_work("profile_delete", move |conn| service(conn).delete_profile(id))
        .await?;
    Ok(Json(profile))
}
