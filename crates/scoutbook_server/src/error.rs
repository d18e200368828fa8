//! HTTP error mapping.
//!
//! # Invariants
//! - Every error body is `{"detail": "<message>"}`.
//! - Internal failures never leak their cause to the client.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use scoutbook_core::ServiceError;
use serde::Serialize;

const INTERNAL_DETAIL: &str = "Internal server error";

/// Client-facing error taxonomy.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    Conflict(String),
    Validation(String),
    /// Request shape rejected by an extractor (bad JSON, bad path, ...).
    Rejected { status: StatusCode, detail: String },
    Internal,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    detail: &'a str,
}

impl ApiError {
    pub fn not_found(entity: &str) -> Self {
        Self::NotFound(format!("{} not found", capitalize(entity)))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Rejected { status, .. } => *status,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn detail(&self) -> &str {
        match self {
            Self::NotFound(detail) | Self::Conflict(detail) | Self::Validation(detail) => detail,
            Self::Rejected { detail, .. } => detail,
            Self::Internal => INTERNAL_DETAIL,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            detail: self.detail(),
        });
        (self.status(), body).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        match value {
            ServiceError::Validation(err) => Self::Validation(err.to_string()),
            ServiceError::NotFound { entity, .. } => Self::not_found(entity),
            ServiceError::Conflict { entity, .. } => {
                Self::Conflict(format!("{} already exists", capitalize(entity)))
            }
            ServiceError::Repo(_) | ServiceError::InconsistentState(_) => Self::Internal,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        Self::Rejected {
            status: value.status(),
            detail: value.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(value: PathRejection) -> Self {
        Self::Rejected {
            status: value.status(),
            detail: value.body_text(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(value: QueryRejection) -> Self {
        Self::Rejected {
            status: value.status(),
            detail: value.body_text(),
        }
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
