//! Run control endpoints: start a scraping run, poll its status.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};

use leadscout_engine::{RunError, RunRequest};

use crate::api::{ApiError, ApiResponse, AppState, ResponseMeta};
use crate::middleware::RequestId;

/// `POST /api/v1/runs` — kicks off a scraping run in the background.
///
/// Returns `202 Accepted` with the initial status snapshot, `400` for a
/// request that cannot possibly produce leads, and `409` when a run is
/// already in progress.
pub async fn start_run(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(request): Json<RunRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if let Err(reason) = validate(&request) {
        return Err(ApiError::new(req_id.0, "validation_error", reason));
    }

    match state.orchestrator.start_run(request) {
        Ok(()) => Ok((
            StatusCode::ACCEPTED,
            Json(ApiResponse {
                data: state.orchestrator.status(),
                meta: ResponseMeta::new(req_id.0),
            }),
        )),
        Err(RunError::AlreadyRunning) => Err(ApiError::new(
            req_id.0,
            "conflict",
            "a scraping run is already in progress",
        )),
        Err(e) => Err(ApiError::new(req_id.0, "internal_error", e.to_string())),
    }
}

/// `GET /api/v1/runs/status` — current status snapshot for polling UIs.
pub async fn run_status(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    Json(ApiResponse {
        data: state.orchestrator.status(),
        meta: ResponseMeta::new(req_id.0),
    })
}

fn validate(request: &RunRequest) -> Result<(), String> {
    if request.search_terms.iter().all(|t| t.trim().is_empty()) {
        return Err("at least one non-empty search term is required".to_owned());
    }
    if request.location.trim().is_empty() {
        return Err("location must not be empty".to_owned());
    }
    if request.max_results == 0 {
        return Err("max_results must be greater than zero".to_owned());
    }
    Ok(())
}
