//! Per-request bookkeeping shared by handlers and their error paths.

use std::time::Instant;

use serde::Serialize;
use uuid::Uuid;

use crate::http::error::{AppError, LegacyError, RequestError};
use crate::http::response::ApiResponse;

/// Request id and start time, minted once per handler call.
pub struct RequestContext {
    pub request_id: String,
    start: Instant,
}

impl RequestContext {
    pub fn start() -> Self {
        Self {
            request_id: Uuid::now_v7().to_string(),
            start: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    /// Success envelope stamped with this request's id and elapsed time.
    pub fn success<T: Serialize>(&self, data: T) -> ApiResponse<T> {
        ApiResponse::success(data, self.request_id.clone(), self.elapsed_ms())
    }

    /// Bind an error to this request for the envelope routes.
    pub fn fail(&self, error: impl Into<AppError>) -> RequestError {
        RequestError {
            request_id: self.request_id.clone(),
            elapsed_ms: self.elapsed_ms(),
            error: error.into(),
        }
    }

    /// Bind an error to this request for the legacy `/api` routes.
    pub fn fail_legacy(&self, error: impl Into<AppError>) -> LegacyError {
        LegacyError {
            request_id: self.request_id.clone(),
            error: error.into(),
        }
    }
}
