//! Shared handler state and per-request unit-of-work execution.
//!
//! # Invariants
//! - Handlers reach storage only through `AppState::unit_of_work`.
//! - Each unit of work runs on the blocking pool and commits or rolls back
//!   before the handler builds its response.

use crate::error::ApiError;
use log::{error, info};
use scoutbook_core::db::Connection;
use scoutbook_core::{ServiceError, ServiceResult, Store};
use std::sync::Arc;
use std::time::Instant;

/// Storage handle injected into every handler.
#[derive(Clone)]
pub struct AppState {
    store: Arc<Store>,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Runs one data access operation inside its own transaction.
    ///
    /// `op` names the operation in `api_request` log events.
    pub async fn unit_of_work<T, F>(&self, op: &'static str, work: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> ServiceResult<T> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        let started_at = Instant::now();
        let outcome = tokio::task::spawn_blocking(move || store.unit_of_work(work)).await;
        let duration_ms = started_at.elapsed().as_millis();

        match outcome {
            Ok(Ok(value)) => {
                info!("event=api_request module=api op={op} status=ok duration_ms={duration_ms}");
                Ok(value)
            }
            Ok(Err(err)) => {
                log_service_error(op, duration_ms, &err);
                Err(err.into())
            }
            Err(err) => {
                error!(
                    "event=api_request module=api op={op} status=error duration_ms={duration_ms} error_code=unit_of_work_aborted error={err}"
                );
                Err(ApiError::Internal)
            }
        }
    }
}

fn log_service_error(op: &str, duration_ms: u128, err: &ServiceError) {
    match err {
        ServiceError::Repo(_) | ServiceError::InconsistentState(_) => error!(
            "event=api_request module=api op={op} status=error duration_ms={duration_ms} error_code=internal error={err}"
        ),
        _ => info!(
            "event=api_request module=api op={op} status=rejected duration_ms={duration_ms} reason={err}"
        ),
    }
}
